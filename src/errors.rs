use std::error;
use std::fmt;
use std::io;

#[cfg(feature = "aio")]
use tokio::time::error::Elapsed;

/// Errors that can occur while configuring a client.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Error parsing endpoint URL: {0}")]
    /// The endpoint is not a valid absolute URL
    InvalidUrl(#[from] url::ParseError),
    #[error("The {0} prefix must not be empty")]
    /// An explicitly configured namespace prefix is empty
    EmptyPrefix(&'static str),
}

/// Errors that can occur when sending a request to the endpoint.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("The envelope could not be rendered as XML: {0}")]
    /// XML writer error
    SerializationError(#[from] quick_xml::Error),
    #[error("Transport error: {0}")]
    /// The request could not be delivered
    TransportError(#[source] Box<dyn error::Error + Send + Sync>),
    #[error("IO Error: {0}")]
    /// The response body could not be read
    IoError(#[from] io::Error),
    #[error("The endpoint returned status code {0}")]
    /// Non-success status, only reported when status checking is enabled
    ErrorCode(u16, Vec<u8>),
}

impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> RequestError {
        RequestError::TransportError(Box::new(err))
    }
}

#[cfg(feature = "aio")]
impl From<Elapsed> for RequestError {
    fn from(err: Elapsed) -> RequestError {
        RequestError::TransportError(Box::new(err))
    }
}

/// An error type that emcompasses all possible errors.
#[derive(Debug)]
pub enum Error {
    /// `ConfigError`
    ConfigError(ConfigError),
    /// `RequestError`
    RequestError(RequestError),
}

/// A result type where the error is `soap_client::Error`.
pub type Result<T = ()> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::ConfigError(ref e) => e.fmt(f),
            Error::RequestError(ref e) => e.fmt(f),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::ConfigError(ref e) => Some(e),
            Error::RequestError(ref e) => Some(e),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Error {
        Error::ConfigError(err)
    }
}

impl From<RequestError> for Error {
    fn from(err: RequestError) -> Error {
        Error::RequestError(err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Error {
        Error::ConfigError(ConfigError::from(err))
    }
}
