//! XML body format.
//!
//! Requests are decoded into a generic mapping (see [`decode`](crate::decode)).
//! Responses are rendered under a single `<response>` root by walking the
//! return schema (see [`encode`](crate::encode)). Errors use attributes for
//! the exception class and code:
//!
//! ```xml
//! <?xml version="1.0" encoding="utf-8"?>
//! <response>
//!   <success>false</success>
//!   <exception class="invalid_parameter_exception" code="invalidparameter">
//!     <message>Invalid parameter value detected</message>
//!     <debug>only in developer debug mode</debug>
//!   </exception>
//! </response>
//! ```

use std::io::Write;

use http::HeaderValue;
use http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use loadedrest_model::{Exception, Schema, Value};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::decode::parse_document;
use crate::encode::{DEFAULT_TAG, render};
use crate::envelope::ErrorEnvelope;
use crate::error::FormatError;
use crate::format::{Format, FormatOptions};
use crate::headers::send_common_headers;

/// Message reported for request bodies that are not well-formed XML.
pub const MALFORMED_XML: &str =
    "mangled and hideous though it was, request body could not be parsed as valid xml";

/// XML version written in the declaration.
pub const VERSION: &str = "1.0";

/// Document encoding written in the declaration.
pub const ENCODING: &str = "utf-8";

/// Root element of every response document.
pub const ROOT_ELEMENT: &str = "response";

/// The XML body format.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlFormat {
    options: FormatOptions,
}

impl XmlFormat {
    /// Name used for factory lookup.
    pub const NAME: &'static str = "xml";

    /// Content type of every XML response.
    pub const CONTENT_TYPE: &'static str = "application/xml; charset=utf-8";

    /// Content disposition suggesting a file name to browsers.
    pub const CONTENT_DISPOSITION: &'static str = "inline; filename=\"response.xml\"";

    /// Create an XML format with the given options.
    #[must_use]
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }
}

fn start_document<W: Write>(out: W) -> Result<Writer<W>, FormatError> {
    let mut writer = Writer::new(out);
    writer.write_event(Event::Decl(BytesDecl::new(VERSION, Some(ENCODING), None)))?;
    Ok(writer)
}

impl Format for XmlFormat {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn parse_request_body(
        &self,
        body: &[u8],
        _schema: Option<&Schema>,
    ) -> Result<Value, FormatError> {
        parse_document(body).map_err(|reason| {
            tracing::debug!(%reason, "rejecting malformed XML request body");
            FormatError::MalformedBody(MALFORMED_XML)
        })
    }

    fn send_headers(&self, headers: &mut http::HeaderMap) {
        send_common_headers(headers);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(Self::CONTENT_TYPE));
        headers.insert(
            CONTENT_DISPOSITION,
            HeaderValue::from_static(Self::CONTENT_DISPOSITION),
        );
    }

    fn send_error(&self, exception: &Exception, out: &mut dyn Write) -> Result<(), FormatError> {
        let envelope = ErrorEnvelope::new(exception, self.options);
        let body = &envelope.exception;
        let code = body.code.to_string();

        let mut writer = start_document(out)?;
        writer
            .create_element(ROOT_ELEMENT)
            .write_inner_content(|w| {
                w.create_element("success")
                    .write_text_content(BytesText::new(if envelope.success {
                        "true"
                    } else {
                        "false"
                    }))?;
                w.create_element("exception")
                    .with_attribute(("class", body.class))
                    .with_attribute(("code", code.as_str()))
                    .write_inner_content(|w| {
                        w.create_element("message")
                            .write_text_content(BytesText::new(body.message))?;
                        if let Some(debug) = body.debug {
                            w.create_element("debug")
                                .write_text_content(BytesText::new(debug))?;
                        }
                        Ok(())
                    })?;
                Ok(())
            })?;
        Ok(())
    }

    fn send_response(
        &self,
        result: &Value,
        schema: &Schema,
        out: &mut dyn Write,
    ) -> Result<(), FormatError> {
        let mut writer = start_document(out)?;
        writer.write_event(Event::Start(BytesStart::new(ROOT_ELEMENT)))?;
        render(&mut writer, result, schema, DEFAULT_TAG)?;
        writer.write_event(Event::End(BytesEnd::new(ROOT_ELEMENT)))?;
        Ok(())
    }

    fn send_empty_response(&self, out: &mut dyn Write) -> Result<(), FormatError> {
        let mut writer = start_document(out)?;
        writer.write_event(Event::Empty(BytesStart::new(ROOT_ELEMENT)))?;
        Ok(())
    }
}
