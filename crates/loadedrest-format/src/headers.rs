//! Response headers shared by every format.

use http::HeaderValue;
use http::header::{ACCEPT_RANGES, ACCESS_CONTROL_ALLOW_ORIGIN, CACHE_CONTROL, EXPIRES, PRAGMA};

/// `Cache-Control` value disabling storage and forcing revalidation.
pub const CACHE_CONTROL_VALUE: &str =
    "private, must-revalidate, pre-check=0, post-check=0, max-age=0";

/// `Expires` value: the Unix epoch as an HTTP date.
pub const EXPIRES_VALUE: &str = "Thu, 01 Jan 1970 00:00:00 GMT";

/// Set the cache, CORS and byte-range headers every response carries.
pub fn send_common_headers(headers: &mut http::HeaderMap) {
    send_access_control_headers(headers);
    send_cache_control_headers(headers);
    send_accept_headers(headers);
}

fn send_cache_control_headers(headers: &mut http::HeaderMap) {
    headers.insert(CACHE_CONTROL, HeaderValue::from_static(CACHE_CONTROL_VALUE));
    headers.insert(EXPIRES, HeaderValue::from_static(EXPIRES_VALUE));
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
}

fn send_access_control_headers(headers: &mut http::HeaderMap) {
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
}

fn send_accept_headers(headers: &mut http::HeaderMap) {
    headers.insert(ACCEPT_RANGES, HeaderValue::from_static("none"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_send_common_headers() {
        let mut headers = http::HeaderMap::new();
        send_common_headers(&mut headers);

        assert_eq!(headers.get(CACHE_CONTROL).unwrap(), CACHE_CONTROL_VALUE);
        assert_eq!(headers.get(EXPIRES).unwrap(), "Thu, 01 Jan 1970 00:00:00 GMT");
        assert_eq!(headers.get(PRAGMA).unwrap(), "no-cache");
        assert_eq!(headers.get(ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "*");
        assert_eq!(headers.get(ACCEPT_RANGES).unwrap(), "none");
        assert_eq!(headers.len(), 5);
    }

    #[test]
    fn test_should_replace_existing_values() {
        let mut headers = http::HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("public"));
        send_common_headers(&mut headers);
        assert_eq!(headers.get_all(CACHE_CONTROL).iter().count(), 1);
        assert_eq!(headers.get(CACHE_CONTROL).unwrap(), CACHE_CONTROL_VALUE);
    }
}
