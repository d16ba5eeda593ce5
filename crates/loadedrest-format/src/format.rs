//! The [`Format`] trait implemented by every body format.

use std::fmt;
use std::io::Write;

use loadedrest_model::{Exception, Schema, Value};

use crate::error::FormatError;

/// Deployment-wide settings handed to every format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatOptions {
    /// Developer debug mode: error envelopes include the exception's debug info.
    pub debug: bool,
}

impl FormatOptions {
    /// Options with developer debug mode switched on or off.
    #[must_use]
    pub fn with_debug(debug: bool) -> Self {
        Self { debug }
    }
}

/// A request and response body format.
///
/// Formats hold no per-call state, so a single instance can serve any number
/// of concurrent calls. Headers are expected to be the same for successful
/// and failed calls: a client that asked for JSON never receives an HTML or
/// XML error page.
pub trait Format: fmt::Debug + Send + Sync {
    /// Stable name used for factory lookup.
    fn name(&self) -> &'static str;

    /// Parse a raw request body into call parameters.
    ///
    /// `schema` describes the expected parameters when the caller has one;
    /// formats may ignore it.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::MalformedBody`] when `body` is not valid syntax
    /// for this format.
    fn parse_request_body(
        &self,
        body: &[u8],
        schema: Option<&Schema>,
    ) -> Result<Value, FormatError>;

    /// Set the response headers for this format.
    ///
    /// Implementations call [`send_common_headers`](crate::headers::send_common_headers)
    /// first and then add their own content headers.
    fn send_headers(&self, headers: &mut http::HeaderMap);

    /// Write the error envelope for `exception`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    fn send_error(&self, exception: &Exception, out: &mut dyn Write) -> Result<(), FormatError>;

    /// Write a successful result shaped by `schema`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails, or if the format needs the
    /// schema and `result` does not fit it.
    fn send_response(
        &self,
        result: &Value,
        schema: &Schema,
        out: &mut dyn Write,
    ) -> Result<(), FormatError>;

    /// Write the answer for a function that declares no return value.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    fn send_empty_response(&self, out: &mut dyn Write) -> Result<(), FormatError>;
}
