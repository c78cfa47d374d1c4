use std::fmt;

use url::Url;

use super::soap;
use crate::common::{self, build_envelope, render, ClientOptions, Envelope, Params};
use crate::errors::{ConfigError, RequestError};

/// Async counterpart of [`crate::Client`].
#[derive(Clone, Debug)]
pub struct Client {
    endpoint: Url,
    options: ClientOptions,
}

impl Client {
    /// Creates a client from namespace declarations such as `xmlns:soap`.
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
        let endpoint = common::parse_endpoint(endpoint, &options)?;
        Ok(Client { endpoint, options })
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
    /// The whole exchange is bounded by the configured timeout.
    pub async fn call<P>(&self, method: &str, params: &P) -> Result<Vec<u8>, RequestError>
    where
        P: Params + ?Sized,
    {
        let xml = self.render(method, params)?;
        common::log_request(&xml);

        let (status, body) = soap::send_async(&self.endpoint, xml, self.options.timeout).await?;
        debug!("received {} bytes with status {} for {}", body.len(), status, method);

        common::check_status(status, body, &self.options)
    }
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.endpoint)
    }
}
