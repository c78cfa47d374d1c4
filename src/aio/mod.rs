//! This module implements the same features as the main crate, but using async io.

mod client;
mod soap;

pub use self::client::Client;
