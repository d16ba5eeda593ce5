//! Return value descriptions.
//!
//! A [`Schema`] is a finite, acyclic tree of three node kinds: scalars,
//! keyed objects and homogeneous lists. Schemas are declared by the
//! developer alongside each web-service function and are never derived from
//! client input, so they are assumed well-formed.

use std::fmt;

use indexmap::IndexMap;

/// The type of a scalar leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ScalarKind {
    /// `true` / `false`.
    Boolean,
    /// Whole number.
    Integer,
    /// Floating point number.
    Float,
    /// Cleaned text.
    Text,
    /// Unfiltered text.
    Raw,
}

impl ScalarKind {
    /// Returns the short name of this kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Text => "text",
            Self::Raw => "raw",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Description of the shape of a value.
///
/// New node kinds may be added; consumers outside this crate must treat an
/// unrecognised variant as a schema mismatch.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Schema {
    /// A single leaf value.
    Scalar {
        /// Type of the leaf.
        kind: ScalarKind,
    },
    /// A keyed structure. Field order is serialization order.
    Object {
        /// Field name to field schema, in declaration order.
        fields: IndexMap<String, Schema>,
    },
    /// A homogeneous sequence.
    List {
        /// Schema shared by every element.
        element: Box<Schema>,
    },
}

impl Schema {
    /// A scalar of the given kind.
    #[must_use]
    pub fn scalar(kind: ScalarKind) -> Self {
        Self::Scalar { kind }
    }

    /// A boolean scalar.
    #[must_use]
    pub fn boolean() -> Self {
        Self::scalar(ScalarKind::Boolean)
    }

    /// An integer scalar.
    #[must_use]
    pub fn integer() -> Self {
        Self::scalar(ScalarKind::Integer)
    }

    /// A float scalar.
    #[must_use]
    pub fn float() -> Self {
        Self::scalar(ScalarKind::Float)
    }

    /// A text scalar.
    #[must_use]
    pub fn text() -> Self {
        Self::scalar(ScalarKind::Text)
    }

    /// An object with fields in the given order.
    #[must_use]
    pub fn object<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Schema)>,
    {
        Self::Object {
            fields: fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// A list whose elements all follow `element`.
    #[must_use]
    pub fn list(element: Schema) -> Self {
        Self::List {
            element: Box::new(element),
        }
    }

    /// Short name of the node kind, for diagnostics.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Scalar { .. } => "scalar",
            Self::Object { .. } => "object",
            Self::List { .. } => "list",
        }
    }

    /// Number of nested levels, counting this node.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Scalar { .. } => 1,
            Self::Object { fields } => 1 + fields.values().map(Schema::depth).max().unwrap_or(0),
            Self::List { element } => 1 + element.depth(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_keep_field_declaration_order() {
        let schema = Schema::object([
            ("zeta", Schema::text()),
            ("alpha", Schema::integer()),
            ("mid", Schema::boolean()),
        ]);
        let Schema::Object { fields } = schema else {
            panic!("expected object schema");
        };
        let names: Vec<&str> = fields.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_should_compute_depth() {
        assert_eq!(Schema::float().depth(), 1);
        assert_eq!(Schema::object::<&str, _>([]).depth(), 1);
        let nested = Schema::list(Schema::object([("key", Schema::list(Schema::float()))]));
        assert_eq!(nested.depth(), 4);
    }

    #[test]
    fn test_should_name_kinds() {
        assert_eq!(Schema::boolean().kind_name(), "scalar");
        assert_eq!(Schema::list(Schema::text()).kind_name(), "list");
        assert_eq!(ScalarKind::Float.to_string(), "float");
    }
}
