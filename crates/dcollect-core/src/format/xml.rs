//! XML (and Atom) payloads -> tree.
//!
//! Conversion rules:
//! - the document is decoded with the encoding it declares (UTF-8 otherwise);
//! - namespace prefixes are stripped from element and attribute names and
//!   `xmlns` declarations are dropped;
//! - dashes in element and attribute names become underscores;
//! - attributes become keys `@name`, renamed to `_name`;
//! - an element with only text is a string, an empty element is `null`;
//!   the texts `true` and `false` become booleans;
//! - an element with attributes or children is a mapping (attributes, then
//!   children in document order, then any text under `#text`);
//! - repeated sibling elements collapse into a sequence.

use crate::error::LoadError;
use crate::Tree;
use quick_xml::encoding::Decoder;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{Map, Value};
use std::borrow::Cow;

/// Literal rewrite applied to the document before parsing. Text holding
/// `&lt;/` (as in the lirias1729192 records) is otherwise parsed wrongly,
/// so every `&lt;` becomes `&lt; /`.
pub const XML_LT_WORKAROUND: (&str, &str) = ("&lt;", "&lt; /");

/// Key under which text is stored when an element also has attributes or children.
pub const TEXT_KEY: &str = "#text";

/// Parse an XML document into `{root_name: root_value}`.
///
/// A document without any element yields `null`.
pub fn xml_to_tree(data: &[u8]) -> Result<Tree, LoadError> {
    let data = rewrite_lt(data);

    let mut reader = Reader::from_reader(data.as_slice());
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut top = Map::new();

    loop {
        let event = reader
            .read_event()
            .map_err(|e| LoadError::Xml(format!("{} at byte {}", e, reader.buffer_position())))?;
        let decoder = reader.decoder();
        match event {
            Event::Start(start) => stack.push(Element::open(&start, decoder)?),
            Event::Empty(start) => {
                let element = Element::open(&start, decoder)?;
                attach(&mut stack, &mut top, element);
            }
            Event::End(_) => match stack.pop() {
                Some(element) => attach(&mut stack, &mut top, element),
                None => return Err(LoadError::Xml("unexpected closing tag".into())),
            },
            Event::Text(text) => {
                if let Some(current) = stack.last_mut() {
                    let decoded = decode(decoder, &text);
                    current.text.push_str(&unescape_or_keep(&decoded));
                }
            }
            Event::CData(cdata) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&decode(decoder, &cdata));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(LoadError::Xml(format!(
            "unexpected end of document, <{}> not closed",
            open.name
        )));
    }
    if top.is_empty() {
        return Ok(Value::Null);
    }
    Ok(Value::Object(top))
}

/// Rename a parsed tag: a leading `@` (attribute marker) becomes `_`.
pub fn convert_tag(tag: &str) -> String {
    match tag.strip_prefix('@') {
        Some(rest) => format!("_{}", rest),
        None => tag.to_string(),
    }
}

/// Byte-level `&lt;` rewrite; the pattern is ASCII so any ASCII-compatible
/// encoding survives it.
fn rewrite_lt(data: &[u8]) -> Vec<u8> {
    let (from, to) = (XML_LT_WORKAROUND.0.as_bytes(), XML_LT_WORKAROUND.1.as_bytes());
    let mut out = Vec::with_capacity(data.len());
    let mut i = 0;
    while i < data.len() {
        if data[i..].starts_with(from) {
            out.extend_from_slice(to);
            i += from.len();
        } else {
            out.push(data[i]);
            i += 1;
        }
    }
    out
}

fn decode<'b>(decoder: Decoder, bytes: &'b [u8]) -> Cow<'b, str> {
    decoder
        .decode(bytes)
        .unwrap_or_else(|_| String::from_utf8_lossy(bytes))
}

/// Resolve entity references; text with an unknown entity is kept as written.
fn unescape_or_keep(text: &str) -> String {
    unescape(text)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| text.to_string())
}

/// Decoded local name with dashes turned into underscores.
fn local_key(decoder: Decoder, local: &[u8]) -> String {
    decode(decoder, local).replace('-', "_")
}

/// `true` / `false` text becomes a boolean, everything else stays text.
fn typecast(text: String) -> Value {
    match text.trim() {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::String(text),
    }
}

struct Element {
    name: String,
    fields: Map<String, Value>,
    text: String,
}

impl Element {
    fn open(start: &BytesStart<'_>, decoder: Decoder) -> Result<Self, LoadError> {
        let name = convert_tag(&local_key(decoder, start.local_name().as_ref()));
        let mut fields = Map::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| LoadError::Xml(e.to_string()))?;
            if attr.key.as_namespace_binding().is_some() {
                continue;
            }
            let tag = format!("@{}", local_key(decoder, attr.key.local_name().as_ref()));
            let value = unescape_or_keep(&decode(decoder, &attr.value));
            fields.insert(convert_tag(&tag), Value::String(value));
        }
        Ok(Self {
            name,
            fields,
            text: String::new(),
        })
    }

    fn into_value(self) -> Value {
        if self.fields.is_empty() {
            if self.text.is_empty() {
                Value::Null
            } else {
                typecast(self.text)
            }
        } else {
            let mut fields = self.fields;
            if !self.text.is_empty() {
                fields.insert(TEXT_KEY.to_string(), Value::String(self.text));
            }
            Value::Object(fields)
        }
    }
}

fn attach(stack: &mut [Element], top: &mut Map<String, Value>, element: Element) {
    let name = element.name.clone();
    let value = element.into_value();
    match stack.last_mut() {
        Some(parent) => push_child(&mut parent.fields, name, value),
        None => push_child(top, name, value),
    }
}

/// Insert `value` under `key`; a repeated key turns into a sequence.
fn push_child(fields: &mut Map<String, Value>, key: String, value: Value) {
    match fields.get_mut(&key) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            fields.insert(key, value);
        }
    }
}
