//! The error envelope shared by every format.
//!
//! ```json
//! {"success":false,"exception":{"class":"...","code":1,"message":"...","debug":"..."}}
//! ```
//!
//! `debug` is present only in developer debug mode, and only when the
//! exception carries debug info.

use loadedrest_model::{Exception, ExceptionCode};

use crate::format::FormatOptions;

/// Top-level error payload.
#[derive(Debug, serde::Serialize)]
pub struct ErrorEnvelope<'a> {
    /// Always `false`.
    pub success: bool,
    /// The reported exception.
    pub exception: ExceptionBody<'a>,
}

/// The `exception` member of the envelope.
#[derive(Debug, serde::Serialize)]
pub struct ExceptionBody<'a> {
    /// Exception class name.
    pub class: &'a str,
    /// Exception code.
    pub code: &'a ExceptionCode,
    /// Human readable message.
    pub message: &'a str,
    /// Debug info, when disclosed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<&'a str>,
}

impl<'a> ErrorEnvelope<'a> {
    /// Build the envelope for `exception`, gating debug info on `options`.
    #[must_use]
    pub fn new(exception: &'a Exception, options: FormatOptions) -> Self {
        let debug = if options.debug {
            exception.debug_info.as_deref()
        } else {
            None
        };
        Self {
            success: false,
            exception: ExceptionBody {
                class: &exception.class,
                code: &exception.code,
                message: &exception.message,
                debug,
            },
        }
    }
}
