use crate::common::{ClientOptions, Params};

/// A structural XML event of a request document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    /// Opening tag with its attributes in output order
    Start {
        /// Qualified element name, e.g. `soap:Envelope`
        name: String,
        /// Attribute names and unescaped values
        attributes: Vec<(String, String)>,
    },
    /// Character data, unescaped
    Text(String),
    /// Closing tag
    End(String),
}

impl Token {
    fn start(name: String) -> Token {
        Token::Start {
            name,
            attributes: Vec::new(),
        }
    }
}

/// The token sequence of a single SOAP request, in document order.
///
/// An envelope is built for one call and consumed by the writer; clients never keep one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Envelope {
    tokens: Vec<Token>,
}

impl Envelope {
    /// Tokens in document order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Consumes the envelope, returning its tokens.
    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether no token has been added.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }
}

/// Builds `<E:Envelope><E:Body><M:method>fields</M:method></E:Body></E:Envelope>`.
///
/// `E` and `M` are the envelope and method prefixes of `options`, the envelope element
/// carries `options.envelope_attributes`. Each named field of `params` becomes one child
/// element of the method; unnamed fields are left out.
pub fn build_envelope<P>(method: &str, params: &P, options: &ClientOptions) -> Envelope
where
    P: Params + ?Sized,
{
    let envelope = format!("{}:Envelope", options.envelope_prefix);
    let body = format!("{}:Body", options.envelope_prefix);
    let ws = format!("{}:{}", options.method_prefix, method);

    let mut request = Envelope::default();

    request.push(Token::Start {
        name: envelope.clone(),
        attributes: options
            .envelope_attributes
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
    });
    request.push(Token::start(body.clone()));
    request.push(Token::start(ws.clone()));

    for field in params.fields() {
        match field.xml_name() {
            Some(name) => {
                request.push(Token::start(name.to_owned()));
                request.push(Token::Text(field.value.clone()));
                request.push(Token::End(name.to_owned()));
            }
            None => trace!("skipping unnamed field of {}", method),
        }
    }

    request.push(Token::End(ws));
    request.push(Token::End(body));
    request.push(Token::End(envelope));

    request
}
