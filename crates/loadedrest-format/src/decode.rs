//! XML request body decoding.
//!
//! Converts an XML document into the generic value tree. The root element's
//! name is discarded and its content becomes the value:
//!
//! - an element with child elements becomes a mapping from child tag to child
//!   value, in document order
//! - any other element becomes its text content, as a string
//! - siblings that share a tag collapse into a sequence under that tag
//!
//! ```xml
//! <request><some>text</some><id>1</id><id>2</id></request>
//! ```
//!
//! decodes to `{"some": "text", "id": ["1", "2"]}`. Scalars are never
//! coerced; every leaf arrives as a string. Attributes, comments and
//! processing instructions are ignored. A root with neither children nor
//! text decodes to an empty mapping. Documents nesting deeper than
//! [`MAX_DEPTH`] elements are rejected.

use std::borrow::Cow;

use loadedrest_model::{Map, Value};
use quick_xml::Reader;
use quick_xml::events::{BytesRef, Event};

/// Deepest element nesting accepted, counting the root as one.
///
/// Matches the recursion limit `serde_json` applies to JSON bodies.
pub const MAX_DEPTH: usize = 128;

/// An element still waiting for its end tag.
#[derive(Debug, Default)]
struct OpenElement {
    name: String,
    children: Map<String, Value>,
    text: String,
}

impl OpenElement {
    fn new(name: String) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    fn add_child(&mut self, name: String, value: Value) {
        match self.children.get_mut(&name) {
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                self.children.insert(name, value);
            }
        }
    }

    fn into_value(self, is_root: bool) -> Value {
        if !self.children.is_empty() {
            Value::Object(self.children)
        } else if is_root && self.text.trim().is_empty() {
            Value::Object(Map::new())
        } else {
            Value::String(self.text)
        }
    }
}

/// Parse an XML document into a generic value.
///
/// # Errors
///
/// Returns a description of the first well-formedness problem found.
pub fn parse_document(body: &[u8]) -> Result<Value, String> {
    let mut reader = Reader::from_reader(body);
    let mut stack: Vec<OpenElement> = Vec::new();
    let mut root: Option<Value> = None;

    loop {
        match reader.read_event().map_err(|e| e.to_string())? {
            Event::Start(e) => {
                if root.is_some() {
                    return Err("multiple root elements".to_owned());
                }
                check_depth(&stack)?;
                stack.push(OpenElement::new(element_name(e.name().as_ref())?));
            }
            Event::Empty(e) => {
                if root.is_some() {
                    return Err("multiple root elements".to_owned());
                }
                check_depth(&stack)?;
                let element = OpenElement::new(element_name(e.name().as_ref())?);
                close_element(&mut stack, &mut root, element);
            }
            Event::End(e) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| "end tag without matching start tag".to_owned())?;
                let end_name = element_name(e.name().as_ref())?;
                if end_name != element.name {
                    return Err(format!(
                        "expected </{}>, found </{end_name}>",
                        element.name
                    ));
                }
                close_element(&mut stack, &mut root, element);
            }
            Event::Text(e) => {
                let decoded = e.decode().map_err(|err| err.to_string())?;
                let unescaped =
                    quick_xml::escape::unescape(&decoded).map_err(|err| err.to_string())?;
                push_text(&mut stack, &unescaped)?;
            }
            Event::CData(e) => {
                let text = std::str::from_utf8(&e).map_err(|err| err.to_string())?;
                push_text(&mut stack, text)?;
            }
            Event::GeneralRef(e) => {
                let resolved = resolve_reference(&e)?;
                push_text(&mut stack, &resolved)?;
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions and doctypes.
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(format!("unclosed element <{}>", open.name));
    }
    root.ok_or_else(|| "missing root element".to_owned())
}

fn check_depth(stack: &[OpenElement]) -> Result<(), String> {
    if stack.len() >= MAX_DEPTH {
        return Err(format!("elements nest deeper than {MAX_DEPTH} levels"));
    }
    Ok(())
}

fn element_name(raw: &[u8]) -> Result<String, String> {
    std::str::from_utf8(raw)
        .map(str::to_owned)
        .map_err(|e| e.to_string())
}

fn close_element(stack: &mut Vec<OpenElement>, root: &mut Option<Value>, element: OpenElement) {
    match stack.last_mut() {
        Some(parent) => {
            let name = element.name.clone();
            parent.add_child(name, element.into_value(false));
        }
        None => *root = Some(element.into_value(true)),
    }
}

fn push_text(stack: &mut [OpenElement], text: &str) -> Result<(), String> {
    match stack.last_mut() {
        Some(open) => {
            open.text.push_str(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err("text outside the root element".to_owned()),
    }
}

fn resolve_reference(reference: &BytesRef<'_>) -> Result<Cow<'static, str>, String> {
    let name = reference.decode().map_err(|e| e.to_string())?;
    if let Some(code) = name.strip_prefix('#') {
        let parsed = match code.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16),
            None => code.parse(),
        };
        return parsed
            .ok()
            .and_then(char::from_u32)
            .map(|ch| Cow::Owned(ch.to_string()))
            .ok_or_else(|| format!("invalid character reference &{name};"));
    }
    quick_xml::escape::resolve_predefined_entity(&name)
        .map(Cow::Borrowed)
        .ok_or_else(|| format!("unknown entity &{name};"))
}
