use std::fmt;
use std::io::Read;
use std::time::Duration;

use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use url::Url;

use crate::errors::RequestError;

/// A response whose body has not been read yet.
///
/// Dropping the exchange releases the underlying connection.
pub struct Exchange {
    /// HTTP status code
    pub status: u16,
    /// Response body stream
    pub body: Box<dyn Read + Send>,
}

impl fmt::Debug for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Exchange").field("status", &self.status).finish_non_exhaustive()
    }
}

/// Delivers a rendered request to the endpoint.
///
/// Implementations perform a single POST and must not retry.
pub trait Transport {
    /// Sends `body` to `url` and returns the response once its headers arrived.
    fn post(&self, url: &Url, content_type: &str, body: Vec<u8>) -> Result<Exchange, RequestError>;
}

impl<T> Transport for &T
where
    T: Transport + ?Sized,
{
    fn post(&self, url: &Url, content_type: &str, body: Vec<u8>) -> Result<Exchange, RequestError> {
        (**self).post(url, content_type, body)
    }
}

/// Blocking HTTP transport backed by `reqwest`.
#[derive(Clone, Debug, Default)]
pub struct HttpTransport {
    timeout: Option<Duration>,
}

impl HttpTransport {
    /// Creates a transport giving up after `timeout`, or never if `None`.
    pub fn new(timeout: Option<Duration>) -> HttpTransport {
        HttpTransport { timeout }
    }
}

impl Transport for HttpTransport {
    fn post(&self, url: &Url, content_type: &str, body: Vec<u8>) -> Result<Exchange, RequestError> {
        let client = reqwest::blocking::Client::builder().timeout(self.timeout).build()?;

        debug!("sending request to: {}", url);
        let resp = client
            .post(url.clone())
            .header(CONTENT_TYPE, content_type)
            .header(CONTENT_LENGTH, body.len() as u64)
            .body(body)
            .send()?;

        debug!("handling response from: {}, status: {}", url, resp.status());
        Ok(Exchange {
            status: resp.status().as_u16(),
            body: Box::new(resp),
        })
    }
}
