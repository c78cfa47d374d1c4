use quick_xml::encoding::EncodingError;
use quick_xml::escape::escape;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::common::{Envelope, Token};
use crate::errors::RequestError;

/// Layout of the rendered request.
///
/// Every line starts with `prefix` followed by `unit` spaces per nesting level.
/// Elements holding only text are kept on one line.
///
/// The default has no line prefix and a four-space unit, so the `Envelope` starts at
/// column 0 and each level is four spaces deeper. `Indent { prefix: "  ".into(), unit: 4 }`
/// additionally shifts every line by two spaces, the layout of `encoding/xml` with
/// `Indent("  ", "    ")`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Indent {
    /// Written at the start of every line
    pub prefix: String,
    /// Spaces per nesting level
    pub unit: usize,
}

impl Indent {
    /// The whole document on a single line.
    pub fn compact() -> Indent {
        Indent {
            prefix: String::new(),
            unit: 0,
        }
    }

    fn is_compact(&self) -> bool {
        self.prefix.is_empty() && self.unit == 0
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            unit: 4,
        }
    }
}

struct IndentingWriter<'a> {
    writer: Writer<Vec<u8>>,
    indent: &'a Indent,
    depth: usize,
    indented_in: bool,
    put_newline: bool,
}

impl<'a> IndentingWriter<'a> {
    fn new(indent: &'a Indent) -> Self {
        Self {
            writer: Writer::new(Vec::new()),
            indent,
            depth: 0,
            indented_in: false,
            put_newline: false,
        }
    }

    // A closing tag right after its opening tag stays on the same line.
    fn write_indent(&mut self, delta: isize) -> Result<(), RequestError> {
        if self.indent.is_compact() {
            return Ok(());
        }
        if delta < 0 {
            self.depth = self.depth.saturating_sub(1);
            if self.indented_in {
                self.indented_in = false;
                return Ok(());
            }
            self.indented_in = false;
        }

        let mut whitespace = String::new();
        if self.put_newline {
            whitespace.push('\n');
        } else {
            self.put_newline = true;
        }
        whitespace.push_str(&self.indent.prefix);
        whitespace.push_str(&" ".repeat(self.indent.unit * self.depth));
        if !whitespace.is_empty() {
            self.write(Event::Text(BytesText::from_escaped(whitespace)))?;
        }

        if delta > 0 {
            self.depth += 1;
            self.indented_in = true;
        }
        Ok(())
    }

    fn write(&mut self, event: Event) -> Result<(), RequestError> {
        self.writer
            .write_event(event)
            .map_err(|e| RequestError::SerializationError(e.into()))
    }

    fn write_token(&mut self, token: &Token) -> Result<(), RequestError> {
        match token {
            Token::Start { name, attributes } => {
                self.write_indent(1)?;
                let mut start = BytesStart::new(name.as_str());
                for (key, value) in attributes {
                    let value = escape_attribute(value);
                    start.push_attribute(Attribute::from((key.as_bytes(), value.as_bytes())));
                }
                self.write(Event::Start(start))
            }
            Token::Text(text) => self.write(Event::Text(BytesText::from_escaped(escape_text(text)))),
            Token::End(name) => {
                self.write_indent(-1)?;
                self.write(Event::End(BytesEnd::new(name.as_str())))
            }
        }
    }
}

/// Renders the envelope as XML text, without an XML declaration.
///
/// Text and attribute values are escaped.
pub fn render(envelope: &Envelope, indent: &Indent) -> Result<String, RequestError> {
    let mut writer = IndentingWriter::new(indent);
    for token in envelope.tokens() {
        writer.write_token(token)?;
    }

    into_text(writer.writer.into_inner())
}

fn into_text(bytes: Vec<u8>) -> Result<String, RequestError> {
    String::from_utf8(bytes)
        .map_err(|e| RequestError::SerializationError(EncodingError::from(e.utf8_error()).into()))
}

// Char ::= #x9 | #xA | #xD | [#x20-#xD7FF] | [#xE000-#xFFFD] | [#x10000-#x10FFFF]
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}

fn replace_invalid(value: &str) -> String {
    value
        .chars()
        .map(|c| if is_xml_char(c) { c } else { char::REPLACEMENT_CHARACTER })
        .collect()
}

/// Escapes character data. Characters XML does not allow become U+FFFD and `\r` is written
/// as a character reference so that parsers do not normalize it away.
fn escape_text(value: &str) -> String {
    let value = replace_invalid(value);
    escape(value.as_str()).replace('\r', "&#xD;")
}

/// Like [`escape_text`], also keeping tabs and newlines out of attribute value normalization.
fn escape_attribute(value: &str) -> String {
    escape_text(value).replace('\n', "&#xA;").replace('\t', "&#x9;")
}
