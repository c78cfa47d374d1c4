//! This library builds SOAP request envelopes and posts them to an endpoint.
//!
//! A method call is turned into a sequence of XML tokens,
//! `<soap:Envelope><soap:Body><ws:Method>fields</ws:Method></soap:Body></soap:Envelope>`,
//! rendered as indented XML and sent as a single `text/xml` POST.
//! The raw response body is returned to the caller.
//!
//! # Example
//! ```no_run
//! use soap_client::{soap_params, Client, Result};
//!
//! soap_params! {
//!     struct GetPrice {
//!         item: String => "Item",
//!     }
//! }
//!
//! fn main() -> Result {
//!     let client = Client::new(
//!         "http://example.com/prices",
//!         [
//!             ("xmlns:soap", "http://schemas.xmlsoap.org/soap/envelope/"),
//!             ("xmlns:ws", "http://example.com/prices/ws"),
//!         ],
//!     )?;
//!     let response = client.call("GetPrice", &GetPrice { item: "Apple".into() })?;
//!     println!("{}", String::from_utf8_lossy(&response));
//!     Ok(())
//! }
//! ```
#![deny(missing_docs)]

#[macro_use]
extern crate log;

// data structures
pub use self::client::Client;
pub use self::common::options::{DEFAULT_ENVELOPE_PREFIX, DEFAULT_METHOD_PREFIX};
pub use self::common::{build_envelope, render, ClientOptions, Envelope, Field, Indent, Params, Token, CONTENT_TYPE};
pub use self::errors::{ConfigError, Error, RequestError, Result};
pub use self::soap::{Exchange, HttpTransport, Transport};

// modules
#[cfg(feature = "aio")]
pub mod aio;
mod client;
mod common;
mod errors;
mod soap;
