//! Exceptions reported to web-service clients.
//!
//! An [`Exception`] is what ends up in the error envelope: a class name, a
//! code, a human readable message and optional debug info. The debug info is
//! only ever disclosed when developer debug mode is on; that decision belongs
//! to the formats, so the exception carries it unconditionally.

use std::fmt;

/// An exception code: either numeric or a short error identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(untagged)]
pub enum ExceptionCode {
    /// Numeric code.
    Int(i64),
    /// Textual error identifier.
    Text(String),
}

impl fmt::Display for ExceptionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(code) => write!(f, "{code}"),
            Self::Text(code) => f.write_str(code),
        }
    }
}

impl From<i64> for ExceptionCode {
    fn from(code: i64) -> Self {
        Self::Int(code)
    }
}

impl From<&str> for ExceptionCode {
    fn from(code: &str) -> Self {
        Self::Text(code.to_owned())
    }
}

impl From<String> for ExceptionCode {
    fn from(code: String) -> Self {
        Self::Text(code)
    }
}

/// A failed call, as reported to the client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{class}: {message}")]
pub struct Exception {
    /// Exception class name.
    pub class: String,
    /// Exception code.
    pub code: ExceptionCode,
    /// Human readable message.
    pub message: String,
    /// Extra detail for developers.
    pub debug_info: Option<String>,
}

impl Exception {
    /// Create an exception without debug info.
    #[must_use]
    pub fn new(
        class: impl Into<String>,
        code: impl Into<ExceptionCode>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            class: class.into(),
            code: code.into(),
            message: message.into(),
            debug_info: None,
        }
    }

    /// Attach debug info.
    #[must_use]
    pub fn with_debug_info(mut self, debug_info: impl Into<String>) -> Self {
        self.debug_info = Some(debug_info.into());
        self
    }

    /// Invalid request parameters; `debug_info` explains what was wrong.
    #[must_use]
    pub fn invalid_parameter(debug_info: impl Into<String>) -> Self {
        Self::new(
            "invalid_parameter_exception",
            "invalidparameter",
            "Invalid parameter value detected",
        )
        .with_debug_info(debug_info)
    }

    /// A function produced a result that could not be serialized.
    #[must_use]
    pub fn invalid_response(debug_info: impl Into<String>) -> Self {
        Self::new(
            "invalid_response_exception",
            "invalidresponse",
            "Invalid response value detected",
        )
        .with_debug_info(debug_info)
    }

    /// A programming error on the server side.
    #[must_use]
    pub fn coding(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self::new(
            "coding_exception",
            "codingerror",
            format!("Coding error detected, it must be fixed by a programmer: {detail}"),
        )
    }

    /// The caller may not use the requested function.
    #[must_use]
    pub fn access(debug_info: impl Into<String>) -> Self {
        Self::new(
            "webservice_access_exception",
            "accessexception",
            "Access control exception",
        )
        .with_debug_info(debug_info)
    }

    /// No function is registered under `function`.
    #[must_use]
    pub fn unknown_function(function: &str) -> Self {
        Self::new(
            "webservice_function_exception",
            "invalidfunction",
            "Web service function not found",
        )
        .with_debug_info(function)
    }
}
