//! JSON body format.
//!
//! JSON describes its own structure, so neither parsing nor encoding needs
//! the schema: a result that already matches the schema's logical shape is
//! written out as-is.

use std::io::Write;

use http::HeaderValue;
use http::header::CONTENT_TYPE;
use loadedrest_model::{Exception, Schema, Value};

use crate::envelope::ErrorEnvelope;
use crate::error::FormatError;
use crate::format::{Format, FormatOptions};
use crate::headers::send_common_headers;

/// Message reported for request bodies that are not valid JSON.
pub const MALFORMED_JSON: &str = "request body could not be parsed as valid json";

/// The JSON body format.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormat {
    options: FormatOptions,
}

impl JsonFormat {
    /// Name used for factory lookup.
    pub const NAME: &'static str = "json";

    /// Content type of every JSON response.
    pub const CONTENT_TYPE: &'static str = "application/json";

    /// Create a JSON format with the given options.
    #[must_use]
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }
}

impl Format for JsonFormat {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn parse_request_body(
        &self,
        body: &[u8],
        _schema: Option<&Schema>,
    ) -> Result<Value, FormatError> {
        serde_json::from_slice(body).map_err(|e| {
            tracing::debug!(error = %e, "rejecting malformed JSON request body");
            FormatError::MalformedBody(MALFORMED_JSON)
        })
    }

    fn send_headers(&self, headers: &mut http::HeaderMap) {
        send_common_headers(headers);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(Self::CONTENT_TYPE));
    }

    fn send_error(&self, exception: &Exception, out: &mut dyn Write) -> Result<(), FormatError> {
        serde_json::to_writer(out, &ErrorEnvelope::new(exception, self.options))?;
        Ok(())
    }

    fn send_response(
        &self,
        result: &Value,
        _schema: &Schema,
        out: &mut dyn Write,
    ) -> Result<(), FormatError> {
        serde_json::to_writer(out, result)?;
        Ok(())
    }

    fn send_empty_response(&self, out: &mut dyn Write) -> Result<(), FormatError> {
        serde_json::to_writer(out, &Value::Null)?;
        Ok(())
    }
}
