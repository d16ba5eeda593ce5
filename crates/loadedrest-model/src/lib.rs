//! Schema, generic value and exception types for LoadedRest.
//!
//! These are the data types exchanged between the body formats and the
//! dispatcher that invokes web-service functions:
//!
//! - [`Schema`]: the developer-declared shape of a function's return value
//! - [`Value`]: the untyped tree produced by request parsing and consumed by
//!   response serialization
//! - [`Exception`]: what a failed call reports back to the client

pub mod exception;
pub mod schema;
pub mod value;

pub use exception::{Exception, ExceptionCode};
pub use schema::{ScalarKind, Schema};
pub use value::{Map, Number, Value};
