//! Response building through a [`Format`].
//!
//! Successful calls and failed calls both answer `200 OK` with the format's
//! headers; only the body differs. The one exception is a disabled protocol,
//! which answers `403 Forbidden` with no body at all.

use http::StatusCode;
use loadedrest_format::Format;
use loadedrest_model::Exception;

use crate::body::LoadedRestBody;
use crate::dispatch::FunctionResult;

fn formatted_response(format: &dyn Format, body: Vec<u8>) -> http::Response<LoadedRestBody> {
    let mut response = http::Response::new(LoadedRestBody::from(body));
    format.send_headers(response.headers_mut());
    response
}

/// Build the response for a successful call.
///
/// A result that the format cannot encode is reported as an error envelope.
#[must_use]
pub fn result_response(
    format: &dyn Format,
    result: &FunctionResult,
) -> http::Response<LoadedRestBody> {
    let mut body = Vec::new();
    let written = match &result.returns {
        Some(schema) => format.send_response(&result.value, schema, &mut body),
        None => format.send_empty_response(&mut body),
    };

    match written {
        Ok(()) => formatted_response(format, body),
        Err(err) => {
            tracing::warn!(format = format.name(), error = %err, "failed to encode result");
            error_response(format, &err.to_exception())
        }
    }
}

/// Build the error envelope response for `exception`.
#[must_use]
pub fn error_response(
    format: &dyn Format,
    exception: &Exception,
) -> http::Response<LoadedRestBody> {
    let mut body = Vec::new();
    match format.send_error(exception, &mut body) {
        Ok(()) => formatted_response(format, body),
        Err(err) => {
            tracing::error!(
                format = format.name(),
                error = %err,
                "failed to encode error envelope"
            );
            let mut response = http::Response::new(LoadedRestBody::empty());
            *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            response
        }
    }
}

/// The answer given while the protocol is disabled.
#[must_use]
pub fn forbidden_response() -> http::Response<LoadedRestBody> {
    let mut response = http::Response::new(LoadedRestBody::empty());
    *response.status_mut() = StatusCode::FORBIDDEN;
    response
}

#[cfg(test)]
mod tests {
    use http::header::CONTENT_TYPE;
    use http_body_util::BodyExt;
    use loadedrest_format::{JsonFormat, XmlFormat};
    use loadedrest_model::Schema;
    use serde_json::json;

    use super::*;

    async fn body_text(response: http::Response<LoadedRestBody>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_should_build_json_result_response() {
        let result = FunctionResult::new(
            json!({"message": "hi"}),
            Schema::object([("message", Schema::text())]),
        );
        let response = result_response(&JsonFormat::default(), &result);
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(body_text(response).await, r#"{"message":"hi"}"#);
    }

    #[tokio::test]
    async fn test_should_build_empty_result_response() {
        let response = result_response(&JsonFormat::default(), &FunctionResult::empty());
        assert_eq!(body_text(response).await, "null");

        let response = result_response(&XmlFormat::default(), &FunctionResult::empty());
        assert!(body_text(response).await.ends_with("<response/>"));
    }

    #[tokio::test]
    async fn test_should_report_unencodable_result_as_error() {
        let result = FunctionResult::new(json!("flat"), Schema::list(Schema::text()));
        let response = result_response(&XmlFormat::default(), &result);
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            "application/xml; charset=utf-8"
        );
        let text = body_text(response).await;
        assert!(text.contains(r#"class="invalid_response_exception""#));
        assert!(!text.contains("<value>"));
    }

    #[tokio::test]
    async fn test_should_build_error_response() {
        let exception = Exception::new("Exception", 1, "message");
        let response = error_response(&JsonFormat::default(), &exception);
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get("pragma").unwrap(), "no-cache");
        assert_eq!(
            body_text(response).await,
            r#"{"success":false,"exception":{"class":"Exception","code":1,"message":"message"}}"#
        );
    }

    #[tokio::test]
    async fn test_should_build_forbidden_response() {
        let response = forbidden_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert!(response.headers().is_empty());
        assert!(body_text(response).await.is_empty());
    }
}
