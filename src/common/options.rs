use std::collections::BTreeMap;
use std::time::Duration;

use crate::common::writer::Indent;
use crate::errors::ConfigError;

/// Default namespace prefix of the `Envelope` and `Body` elements
pub const DEFAULT_ENVELOPE_PREFIX: &str = "soap";

/// Default namespace prefix of the method element
pub const DEFAULT_METHOD_PREFIX: &str = "ws";

/// Options for building and sending SOAP requests
#[derive(Clone, Debug)]
pub struct ClientOptions {
    /// Prefix of the `Envelope` and `Body` elements
    pub envelope_prefix: String,

    /// Prefix of the method element
    pub method_prefix: String,

    /// Attributes of the `Envelope` element, usually namespace declarations.
    /// They are rendered in key order.
    pub envelope_attributes: BTreeMap<String, String>,

    /// Formatting of the rendered request
    pub indent: Indent,

    /// Deadline for the whole exchange, `None` waits forever
    pub timeout: Option<Duration>,

    /// Turn non-2xx responses into `RequestError::ErrorCode`
    pub check_status: bool,
}

impl ClientOptions {
    /// Builds options from namespace declarations such as `xmlns:soap` or `xmlns:ws`.
    ///
    /// Every declaration becomes an attribute of the `Envelope` element. The segment of the
    /// key between the first and second `:` also selects a prefix: if it contains `soa` it replaces
    /// the envelope prefix, otherwise the method prefix. Keys are visited in sorted order,
    /// so the last matching key wins.
    pub fn from_namespaces<I, K, V>(namespaces: I) -> ClientOptions
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let envelope_attributes: BTreeMap<String, String> =
            namespaces.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        let mut envelope_prefix = DEFAULT_ENVELOPE_PREFIX;
        let mut method_prefix = DEFAULT_METHOD_PREFIX;

        for key in envelope_attributes.keys() {
            match key.split(':').nth(1) {
                Some(prefix) if prefix.is_empty() => {
                    warn!("namespace declaration {:?} has an empty prefix, ignoring it as prefix", key);
                }
                Some(prefix) if prefix.contains("soa") => {
                    envelope_prefix = prefix;
                }
                Some(prefix) => {
                    method_prefix = prefix;
                }
                None => {
                    warn!("namespace declaration {:?} has no prefix, ignoring it as prefix", key);
                }
            }
        }

        ClientOptions {
            envelope_prefix: envelope_prefix.to_owned(),
            method_prefix: method_prefix.to_owned(),
            envelope_attributes,
            ..Default::default()
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.envelope_prefix.is_empty() {
            return Err(ConfigError::EmptyPrefix("envelope"));
        }
        if self.method_prefix.is_empty() {
            return Err(ConfigError::EmptyPrefix("method"));
        }
        Ok(())
    }
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            envelope_prefix: DEFAULT_ENVELOPE_PREFIX.to_owned(),
            method_prefix: DEFAULT_METHOD_PREFIX.to_owned(),
            envelope_attributes: BTreeMap::new(),
            indent: Indent::default(),
            timeout: None,
            check_status: false,
        }
    }
}
