use std::fmt;
use std::io::Read;

use url::Url;

use crate::common::{self, build_envelope, render, ClientOptions, Envelope, Params};
use crate::errors::{ConfigError, RequestError};
use crate::soap::{HttpTransport, Transport};

/// A SOAP endpoint together with the way requests to it are built.
///
/// Requests are built from scratch on every call, so a client can be shared between threads.
#[derive(Clone, Debug)]
pub struct Client<T = HttpTransport> {
    endpoint: Url,
    options: ClientOptions,
    transport: T,
}

impl Client {
    /// Creates a client from namespace declarations such as `xmlns:soap`.
    ///
    /// See [`ClientOptions::from_namespaces`] for how the declarations pick the prefixes.
    ///
    /// # Example
    /// ```no_run
    /// use soap_client::{Client, Field, Result};
    ///
    /// fn main() -> Result {
    ///     let client = Client::new(
    ///         "http://example.com/service",
    ///         [("xmlns:soap", "http://schemas.xmlsoap.org/soap/envelope/")],
    ///     )?;
    ///     let body = client.call("GetPrice", &[Field::new("Item", "Apple")])?;
    ///     println!("{}", String::from_utf8_lossy(&body));
    ///     Ok(())
    /// }
    /// ```
    pub fn new<I, K, V>(endpoint: &str, namespaces: I) -> Result<Client, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Client::with_options(endpoint, ClientOptions::from_namespaces(namespaces))
    }

    /// Creates a client with explicit options.
    pub fn with_options(endpoint: &str, options: ClientOptions) -> Result<Client, ConfigError> {
        let transport = HttpTransport::new(options.timeout);
        Client::with_transport(endpoint, options, transport)
    }
}

impl<T> Client<T>
where
    T: Transport,
{
    /// Creates a client sending its requests through `transport`.
    pub fn with_transport(endpoint: &str, options: ClientOptions, transport: T) -> Result<Client<T>, ConfigError> {
        let endpoint = common::parse_endpoint(endpoint, &options)?;
        Ok(Client {
            endpoint,
            options,
            transport,
        })
    }

    /// The URL requests are posted to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// The options requests are built with.
    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Builds the token sequence for a call without sending it.
    pub fn envelope<P>(&self, method: &str, params: &P) -> Envelope
    where
        P: Params + ?Sized,
    {
        build_envelope(method, params, &self.options)
    }

    /// Renders the request body for a call without sending it.
    pub fn render<P>(&self, method: &str, params: &P) -> Result<String, RequestError>
    where
        P: Params + ?Sized,
    {
        render(&self.envelope(method, params), &self.options.indent)
    }

    /// Calls `method` with `params` and returns the raw response body.
    ///
    /// The status code is only looked at when `check_status` is set; otherwise any
    /// response that could be read is returned as is.
    pub fn call<P>(&self, method: &str, params: &P) -> Result<Vec<u8>, RequestError>
    where
        P: Params + ?Sized,
    {
        let xml = self.render(method, params)?;
        common::log_request(&xml);

        let mut exchange = self
            .transport
            .post(&self.endpoint, common::CONTENT_TYPE, xml.into_bytes())?;

        let mut body = Vec::new();
        exchange.body.read_to_end(&mut body)?;
        debug!(
            "received {} bytes with status {} for {}",
            body.len(),
            exchange.status,
            method
        );

        common::check_status(exchange.status, body, &self.options)
    }
}

impl<T> fmt::Display for Client<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.endpoint)
    }
}
