//! Schema-driven XML encoding.
//!
//! XML has no native notion of lists or maps, so results are rendered by
//! walking the return [`Schema`] in lock-step with the value, emitting one
//! element per schema node:
//!
//! - a scalar becomes `<tag>text</tag>`
//! - an object becomes `<tag>` wrapping one child per declared field, each
//!   named after its field
//! - a list becomes `<tag>` wrapping one child per item, every item reusing
//!   `tag`
//!
//! ```xml
//! <value>
//!   <value><key>3.14</key></value>
//!   <value><key>2.72</key></value>
//! </value>
//! ```
//!
//! `null` (and object fields missing from the value) render as an empty
//! element. Recursion depth follows the schema, never the input, and is
//! capped at [`MAX_DEPTH`].

use std::io::Write;

use loadedrest_model::value::kind_name;
use loadedrest_model::{ScalarKind, Schema, Value};
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use crate::error::FormatError;

/// Element name used for the outermost value and for list items.
pub const DEFAULT_TAG: &str = "value";

/// Maximum schema nesting the encoder will follow.
pub const MAX_DEPTH: usize = 64;

/// Render `value` as XML shaped by `schema`, using `tag` for the outermost element.
///
/// # Errors
///
/// Returns [`FormatError::SchemaMismatch`] if the schema node is of an
/// unsupported kind or nests deeper than [`MAX_DEPTH`], and
/// [`FormatError::InvalidResult`] if the value's shape contradicts it.
/// Returns [`FormatError::Io`] if writing fails. Output written before the
/// failure is left in the writer.
pub fn render<W: Write>(
    writer: &mut Writer<W>,
    value: &Value,
    schema: &Schema,
    tag: &str,
) -> Result<(), FormatError> {
    render_node(writer, value, schema, tag, 0)
}

fn render_node<W: Write>(
    writer: &mut Writer<W>,
    value: &Value,
    schema: &Schema,
    tag: &str,
    depth: usize,
) -> Result<(), FormatError> {
    if depth >= MAX_DEPTH {
        return Err(FormatError::SchemaMismatch(format!(
            "schema nests deeper than {MAX_DEPTH} levels at <{tag}>"
        )));
    }

    if value.is_null() {
        writer.create_element(tag).write_empty()?;
        return Ok(());
    }

    match schema {
        Schema::Scalar { kind } => {
            let text = scalar_text(value, *kind, tag)?;
            writer
                .create_element(tag)
                .write_text_content(BytesText::new(&text))?;
        }
        Schema::Object { fields } => {
            let Value::Object(map) = value else {
                return Err(shape_mismatch(tag, schema, value));
            };
            writer.write_event(Event::Start(BytesStart::new(tag)))?;
            for (name, field_schema) in fields {
                let field = map.get(name).unwrap_or(&Value::Null);
                render_node(writer, field, field_schema, name, depth + 1)?;
            }
            writer.write_event(Event::End(BytesEnd::new(tag)))?;
        }
        Schema::List { element } => {
            let Value::Array(items) = value else {
                return Err(shape_mismatch(tag, schema, value));
            };
            writer.write_event(Event::Start(BytesStart::new(tag)))?;
            for item in items {
                render_node(writer, item, element, tag, depth + 1)?;
            }
            writer.write_event(Event::End(BytesEnd::new(tag)))?;
        }
        _ => {
            return Err(FormatError::SchemaMismatch(format!(
                "unsupported schema node at <{tag}>"
            )));
        }
    }

    Ok(())
}

/// Text content of a scalar leaf.
///
/// Booleans always render as `true`/`false`; everything else is stringified.
fn scalar_text(value: &Value, kind: ScalarKind, tag: &str) -> Result<String, FormatError> {
    if kind == ScalarKind::Boolean {
        return truthiness(value)
            .map(|b| if b { "true" } else { "false" }.to_owned())
            .ok_or_else(|| {
                FormatError::InvalidResult(format!(
                    "<{tag}> expects a boolean, got {}",
                    describe(value)
                ))
            });
    }

    match value {
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::String(s) => Ok(s.clone()),
        other => Err(FormatError::InvalidResult(format!(
            "<{tag}> expects a {kind} scalar, got {}",
            kind_name(other)
        ))),
    }
}

/// Interpret a scalar as a boolean the way loosely typed callers produce them.
fn truthiness(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.as_str() {
            "1" | "true" => Some(true),
            "" | "0" | "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::String(s) => format!("string {s:?}"),
        other => kind_name(other).to_owned(),
    }
}

fn shape_mismatch(tag: &str, schema: &Schema, value: &Value) -> FormatError {
    FormatError::InvalidResult(format!(
        "<{tag}> is described as {} but the value is a {}",
        schema.kind_name(),
        kind_name(value)
    ))
}

#[cfg(test)]
#[allow(clippy::approx_constant)]
mod tests {
    use serde_json::json;

    use super::*;

    fn rendered(value: &Value, schema: &Schema) -> String {
        let mut buf = Vec::new();
        let mut writer = Writer::new(&mut buf);
        render(&mut writer, value, schema, DEFAULT_TAG).expect("render should succeed");
        String::from_utf8(buf).expect("valid UTF-8")
    }

    fn render_err(value: &Value, schema: &Schema) -> FormatError {
        let mut buf = Vec::new();
        let mut writer = Writer::new(&mut buf);
        render(&mut writer, value, schema, DEFAULT_TAG).unwrap_err()
    }

    #[test]
    fn test_should_render_boolean_as_word() {
        assert_eq!(rendered(&json!(true), &Schema::boolean()), "<value>true</value>");
        assert_eq!(rendered(&json!(false), &Schema::boolean()), "<value>false</value>");
        assert_eq!(rendered(&json!(1), &Schema::boolean()), "<value>true</value>");
        assert_eq!(rendered(&json!("0"), &Schema::boolean()), "<value>false</value>");
    }

    #[test]
    fn test_should_render_scalars_as_text() {
        assert_eq!(rendered(&json!(42), &Schema::integer()), "<value>42</value>");
        assert_eq!(rendered(&json!(3.14), &Schema::float()), "<value>3.14</value>");
        assert_eq!(rendered(&json!("hi"), &Schema::text()), "<value>hi</value>");
        assert_eq!(rendered(&json!(true), &Schema::text()), "<value>true</value>");
    }

    #[test]
    fn test_should_render_object_fields_in_schema_order() {
        let schema = Schema::object([("key", Schema::float())]);
        assert_eq!(
            rendered(&json!({"key": 3.14}), &schema),
            "<value><key>3.14</key></value>"
        );

        let schema = Schema::object([("b", Schema::integer()), ("a", Schema::integer())]);
        assert_eq!(
            rendered(&json!({"a": 1, "b": 2, "ignored": 3}), &schema),
            "<value><b>2</b><a>1</a></value>"
        );
    }

    #[test]
    fn test_should_render_list_items_with_shared_tag() {
        let schema = Schema::list(Schema::object([("key", Schema::float())]));
        assert_eq!(
            rendered(&json!([{"key": 3.14}]), &schema),
            "<value><value><key>3.14</key></value></value>"
        );
        assert_eq!(
            rendered(&json!([{"key": 1.5}, {"key": 2.5}]), &schema),
            "<value><value><key>1.5</key></value><value><key>2.5</key></value></value>"
        );
    }

    #[test]
    fn test_should_reuse_field_name_for_nested_list_items() {
        let schema = Schema::object([("tags", Schema::list(Schema::text()))]);
        assert_eq!(
            rendered(&json!({"tags": ["a", "b"]}), &schema),
            "<value><tags><tags>a</tags><tags>b</tags></tags></value>"
        );
    }

    #[test]
    fn test_should_render_empty_containers() {
        assert_eq!(
            rendered(&json!([]), &Schema::list(Schema::text())),
            "<value></value>"
        );
        assert_eq!(
            rendered(&json!({}), &Schema::object::<&str, _>([])),
            "<value></value>"
        );
    }

    #[test]
    fn test_should_render_null_and_missing_fields_as_empty_elements() {
        let schema = Schema::object([("present", Schema::text()), ("absent", Schema::text())]);
        assert_eq!(
            rendered(&json!({"present": "x"}), &schema),
            "<value><present>x</present><absent/></value>"
        );
        assert_eq!(rendered(&json!(null), &Schema::text()), "<value/>");
    }

    #[test]
    fn test_should_escape_text() {
        assert_eq!(
            rendered(&json!("a < b & c"), &Schema::text()),
            "<value>a &lt; b &amp; c</value>"
        );
    }

    #[test]
    fn test_should_reject_value_shape_mismatch() {
        let err = render_err(&json!("flat"), &Schema::object([("key", Schema::float())]));
        assert!(matches!(err, FormatError::InvalidResult(_)));

        let err = render_err(&json!({"key": 1}), &Schema::list(Schema::text()));
        assert!(matches!(err, FormatError::InvalidResult(_)));

        let err = render_err(&json!([1]), &Schema::integer());
        assert!(matches!(err, FormatError::InvalidResult(_)));

        let err = render_err(&json!("maybe"), &Schema::boolean());
        assert!(err.to_string().contains("expects a boolean"));
    }

    #[test]
    fn test_should_cap_recursion_depth() {
        let mut schema = Schema::text();
        let mut value = json!("leaf");
        for _ in 0..MAX_DEPTH {
            schema = Schema::list(schema);
            value = json!([value]);
        }
        let err = render_err(&value, &schema);
        assert!(err.to_string().contains("deeper than"));
    }
}
