pub mod envelope;
pub mod options;
pub mod params;
pub mod writer;
#[cfg(test)]
mod tests;

pub use self::envelope::{build_envelope, Envelope, Token};
pub use self::options::ClientOptions;
pub use self::params::{Field, Params};
pub use self::writer::{render, Indent};

use url::Url;

use crate::errors::{ConfigError, RequestError};

/// Content type of every request
pub const CONTENT_TYPE: &str = "text/xml;charset=UTF-8";

/// Title of the request log entry
pub const LOG_TITLE: &str = "SOAP: XML REQUEST";

pub fn parse_endpoint(endpoint: &str, options: &ClientOptions) -> Result<Url, ConfigError> {
    options.validate()?;
    Ok(Url::parse(endpoint)?)
}

pub fn log_request(xml: &str) {
    debug!("{}\n{}", LOG_TITLE, xml);
}

pub fn check_status(status: u16, body: Vec<u8>, options: &ClientOptions) -> Result<Vec<u8>, RequestError> {
    if options.check_status && !(200..300).contains(&status) {
        warn!("endpoint answered with status {}", status);
        return Err(RequestError::ErrorCode(status, body));
    }
    Ok(body)
}
