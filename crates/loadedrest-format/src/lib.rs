//! Pluggable body formats for the LoadedRest web-service protocol.
//!
//! A [`Format`] parses an inbound request body into a generic
//! [`Value`](loadedrest_model::Value) and serializes results and exceptions
//! back out. Formats are selected by name through the [`FormatFactory`],
//! which falls back to JSON when a client asks for something unknown.
//!
//! # Formats
//!
//! - [`JsonFormat`] (`json`): self-describing, so results are encoded as-is.
//! - [`XmlFormat`] (`xml`): results are rendered by walking the return
//!   [`Schema`](loadedrest_model::Schema) in lock-step with the value, one
//!   element per schema node.
//!
//! # Adding a format
//!
//! Implement [`Format`] and add one entry to the factory's registry table.
//! Existing formats are untouched.

pub mod decode;
pub mod encode;
pub mod envelope;
pub mod error;
pub mod factory;
pub mod format;
pub mod headers;
pub mod json;
pub mod xml;

pub use error::FormatError;
pub use factory::{DEFAULT_FORMAT, FormatFactory};
pub use format::{Format, FormatOptions};
pub use json::JsonFormat;
pub use xml::XmlFormat;
