//! Request parameter extraction.
//!
//! Control parameters (`wsformat`, `wstoken`, `wsfunction`) may arrive in the
//! query string or in an `application/x-www-form-urlencoded` body. Sources are
//! merged in that order, so form values win over query values. Every other
//! field becomes a function parameter.

use http::HeaderMap;
use http::header::CONTENT_TYPE;
use loadedrest_model::{Map, Value};

/// Parameter selecting the body format.
pub const FORMAT_PARAM: &str = "wsformat";

/// Parameter carrying the authentication token.
pub const TOKEN_PARAM: &str = "wstoken";

/// Parameter naming the function to call.
pub const FUNCTION_PARAM: &str = "wsfunction";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Parameters collected from the query string and form body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestParams {
    /// Requested body format, if any.
    pub format: Option<String>,
    /// Authentication token, if any.
    pub token: Option<String>,
    /// Function name, if any.
    pub function: Option<String>,
    /// Remaining fields, as strings.
    pub fields: Map<String, Value>,
}

impl RequestParams {
    /// Collect parameters from a query string and an optional form body.
    #[must_use]
    pub fn extract(query: Option<&str>, form: Option<&[u8]>) -> Self {
        let mut params = Self::default();
        let pairs = query
            .map(str::as_bytes)
            .into_iter()
            .chain(form)
            .flat_map(form_urlencoded::parse);

        for (key, value) in pairs {
            let value = value.into_owned();
            match key.as_ref() {
                FORMAT_PARAM => params.format = Some(value),
                TOKEN_PARAM => params.token = Some(value),
                FUNCTION_PARAM => params.function = Some(value),
                _ => {
                    params.fields.insert(key.into_owned(), Value::String(value));
                }
            }
        }

        params
    }

    /// Merge the collected fields under a parsed body.
    ///
    /// Body members win over query and form fields. A body that is not a
    /// mapping is returned untouched.
    #[must_use]
    pub fn merge_into(&self, body: Value) -> Value {
        match body {
            Value::Object(members) => {
                let mut merged = self.fields.clone();
                merged.extend(members);
                Value::Object(merged)
            }
            other => other,
        }
    }
}

/// Whether the request body is form encoded.
#[must_use]
pub fn is_form_body(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case(FORM_CONTENT_TYPE))
}

/// Whether the body carries nothing but whitespace.
#[must_use]
pub fn is_blank(body: &[u8]) -> bool {
    body.iter().all(u8::is_ascii_whitespace)
}

#[cfg(test)]
mod tests {
    use http::HeaderValue;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_should_extract_control_parameters_from_query() {
        let params = RequestParams::extract(
            Some("wsformat=xml&wstoken=abc&wsfunction=core_webservice_get_site_info&x=1"),
            None,
        );
        assert_eq!(params.format.as_deref(), Some("xml"));
        assert_eq!(params.token.as_deref(), Some("abc"));
        assert_eq!(
            params.function.as_deref(),
            Some("core_webservice_get_site_info")
        );
        assert_eq!(Value::Object(params.fields), json!({"x": "1"}));
    }

    #[test]
    fn test_should_prefer_form_values_over_query() {
        let params = RequestParams::extract(
            Some("wsformat=json&wstoken=old&a=query"),
            Some(b"wstoken=new&a=form&b=%20spaced+out"),
        );
        assert_eq!(params.format.as_deref(), Some("json"));
        assert_eq!(params.token.as_deref(), Some("new"));
        assert_eq!(
            Value::Object(params.fields),
            json!({"a": "form", "b": " spaced out"})
        );
    }

    #[test]
    fn test_should_leave_missing_parameters_unset() {
        let params = RequestParams::extract(None, None);
        assert_eq!(params, RequestParams::default());
    }

    #[test]
    fn test_should_merge_fields_under_body_members() {
        let params = RequestParams::extract(Some("a=query&b=query"), None);
        let merged = params.merge_into(json!({"b": "body", "c": "body"}));
        assert_eq!(merged, json!({"a": "query", "b": "body", "c": "body"}));
        assert_eq!(params.merge_into(json!([1, 2])), json!([1, 2]));
    }

    #[test]
    fn test_should_detect_form_bodies() {
        let mut headers = HeaderMap::new();
        assert!(!is_form_body(&headers));

        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded; charset=UTF-8"),
        );
        assert!(is_form_body(&headers));

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        assert!(!is_form_body(&headers));
    }

    #[test]
    fn test_should_detect_blank_bodies() {
        assert!(is_blank(b""));
        assert!(is_blank(b" \r\n\t"));
        assert!(!is_blank(b"{}"));
    }
}
