//! Format error types.

use std::io;

use loadedrest_model::Exception;

/// Errors raised while negotiating, parsing or serializing a body format.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    /// The request body is not valid syntax for the format.
    ///
    /// Displays as the bare, client-facing message.
    #[error("{0}")]
    MalformedBody(&'static str),

    /// No format is registered under the requested name.
    #[error("invalid format \"{0}\"")]
    UnknownFormat(String),

    /// The XML encoder was given a schema it cannot walk.
    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),

    /// A function result does not fit its declared return schema.
    #[error("invalid result: {0}")]
    InvalidResult(String),

    /// An I/O error while writing the response body.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A JSON encoding error.
    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FormatError {
    /// Whether this error was caused by client input rather than a server bug.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::MalformedBody(_))
    }

    /// Convert into the exception reported to the client.
    #[must_use]
    pub fn to_exception(&self) -> Exception {
        match self {
            Self::MalformedBody(message) => Exception::invalid_parameter(*message),
            Self::InvalidResult(detail) => Exception::invalid_response(detail.clone()),
            Self::SchemaMismatch(_) | Self::UnknownFormat(_) | Self::Io(_) | Self::Json(_) => {
                Exception::coding(self.to_string())
            }
        }
    }
}
