//! The generic value tree.
//!
//! Parsed request parameters and function results are plain
//! [`serde_json::Value`] trees. The workspace enables `preserve_order`, so
//! mappings keep keys in insertion order regardless of the wire format they
//! came from.

pub use serde_json::{Map, Number, Value};

/// Short name of a value's kind, for diagnostics.
#[must_use]
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_should_preserve_insertion_order() {
        let mut map = Map::new();
        map.insert("b".to_owned(), json!(1));
        map.insert("a".to_owned(), json!(2));
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_should_name_value_kinds() {
        assert_eq!(kind_name(&json!(null)), "null");
        assert_eq!(kind_name(&json!([1])), "sequence");
        assert_eq!(kind_name(&json!({"k": "v"})), "mapping");
    }
}
