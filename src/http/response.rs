//! HTTP response building module
//!
//! Every body this server produces is JSON; builders never panic and fall
//! back to a bare response if the builder rejects a header.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

use crate::config::HttpConfig;
use crate::listing::ErrorPayload;

const JSON_CONTENT_TYPE: &str = "application/json";
const ALLOWED_METHODS: &str = "GET, HEAD, OPTIONS";

/// Build a JSON response
///
/// With `is_head` the body is dropped but `Content-Length` still reports
/// the size the GET body would have.
pub fn build_json_response<T: Serialize + ?Sized>(
    status: StatusCode,
    body: &T,
    http: &HttpConfig,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let json = match serde_json::to_vec(body) {
        Ok(j) => j,
        Err(e) => {
            log_build_error("JSON", &e);
            br#"{"error":"Internal server error"}"#.to_vec()
        }
    };
    let content_length = json.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(json)
    };

    let mut builder = Response::builder()
        .status(status)
        .header("Content-Type", JSON_CONTENT_TYPE)
        .header("Content-Length", content_length)
        .header("Server", http.server_name.as_str());
    if http.enable_cors {
        builder = builder.header("Access-Control-Allow-Origin", "*");
    }

    builder.body(Full::new(body.clone())).unwrap_or_else(|e| {
        log_build_error(status.as_str(), &e);
        fallback_response(status, Some(JSON_CONTENT_TYPE), body)
    })
}

/// Response built without the builder, used when a configured header is rejected.
/// Keeps the status and content type so clients still see the intended outcome.
fn fallback_response(
    status: StatusCode,
    content_type: Option<&'static str>,
    body: Bytes,
) -> Response<Full<Bytes>> {
    let mut resp = Response::new(Full::new(body));
    *resp.status_mut() = status;
    if let Some(content_type) = content_type {
        resp.headers_mut().insert(
            hyper::header::CONTENT_TYPE,
            hyper::header::HeaderValue::from_static(content_type),
        );
    }
    resp
}

/// Build 404 Not Found response
pub fn build_404_response(http: &HttpConfig, is_head: bool) -> Response<Full<Bytes>> {
    build_json_response(
        StatusCode::NOT_FOUND,
        &ErrorPayload::new("Not Found"),
        http,
        is_head,
    )
}

/// Build 405 Method Not Allowed response
pub fn build_405_response(http: &HttpConfig) -> Response<Full<Bytes>> {
    let mut resp = build_json_response(
        StatusCode::METHOD_NOT_ALLOWED,
        &ErrorPayload::new("Method Not Allowed"),
        http,
        false,
    );
    resp.headers_mut().insert(
        hyper::header::ALLOW,
        hyper::header::HeaderValue::from_static(ALLOWED_METHODS),
    );
    resp
}

/// Build 413 Payload Too Large response
pub fn build_413_response(http: &HttpConfig) -> Response<Full<Bytes>> {
    build_json_response(
        StatusCode::PAYLOAD_TOO_LARGE,
        &ErrorPayload::new("Payload Too Large"),
        http,
        false,
    )
}

/// Build OPTIONS response (preflight request)
pub fn build_options_response(http: &HttpConfig) -> Response<Full<Bytes>> {
    let mut builder = Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header("Allow", ALLOWED_METHODS)
        .header("Server", http.server_name.as_str());

    if http.enable_cors {
        builder = builder
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", ALLOWED_METHODS)
            .header("Access-Control-Allow-Headers", "Content-Type")
            .header("Access-Control-Max-Age", "86400");
    }

    builder.body(Full::new(Bytes::new())).unwrap_or_else(|e| {
        log_build_error("OPTIONS", &e);
        let mut resp = fallback_response(StatusCode::NO_CONTENT, None, Bytes::new());
        resp.headers_mut().insert(
            hyper::header::ALLOW,
            hyper::header::HeaderValue::from_static(ALLOWED_METHODS),
        );
        resp
    })
}

/// Build health probe response
pub fn build_health_response(http: &HttpConfig, is_head: bool) -> Response<Full<Bytes>> {
    build_json_response(
        StatusCode::OK,
        &serde_json::json!({ "status": "ok" }),
        http,
        is_head,
    )
}

/// Log response build error
fn log_build_error(status: &str, error: &dyn std::fmt::Display) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    fn http_config(enable_cors: bool) -> HttpConfig {
        HttpConfig {
            server_name: "dirlist-test".to_string(),
            enable_cors,
            max_body_size: 1024,
        }
    }

    async fn body_string(resp: Response<Full<Bytes>>) -> String {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_json_response_headers_and_body() {
        let resp = build_json_response(StatusCode::OK, &[1, 2, 3], &http_config(false), false);
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["content-type"], "application/json");
        assert_eq!(resp.headers()["content-length"], "7");
        assert_eq!(resp.headers()["server"], "dirlist-test");
        assert!(resp.headers().get("access-control-allow-origin").is_none());
        assert_eq!(body_string(resp).await, "[1,2,3]");
    }

    #[tokio::test]
    async fn test_head_drops_body_keeps_length() {
        let resp = build_json_response(StatusCode::OK, &[1, 2, 3], &http_config(false), true);
        assert_eq!(resp.headers()["content-length"], "7");
        assert_eq!(body_string(resp).await, "");
    }

    #[test]
    fn test_cors_header() {
        let resp = build_json_response(StatusCode::OK, &(), &http_config(true), false);
        assert_eq!(resp.headers()["access-control-allow-origin"], "*");
    }

    #[tokio::test]
    async fn test_404_uses_error_payload() {
        let resp = build_404_response(&http_config(false), false);
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_string(resp).await, r#"{"error":"Not Found"}"#);
    }

    #[test]
    fn test_405_lists_allowed_methods() {
        let resp = build_405_response(&http_config(false));
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(resp.headers()["allow"], "GET, HEAD, OPTIONS");
    }

    fn invalid_server_name() -> HttpConfig {
        HttpConfig {
            server_name: "dirlist\n0.1".to_string(),
            enable_cors: false,
            max_body_size: 1024,
        }
    }

    #[tokio::test]
    async fn test_rejected_header_keeps_status_and_body() {
        let resp = build_json_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            &ErrorPayload::new("no such file or directory"),
            &invalid_server_name(),
            false,
        );
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(resp.headers()["content-type"], "application/json");
        assert_eq!(
            body_string(resp).await,
            r#"{"error":"no such file or directory"}"#
        );
    }

    #[test]
    fn test_rejected_header_keeps_options_status() {
        let resp = build_options_response(&invalid_server_name());
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert_eq!(resp.headers()["allow"], "GET, HEAD, OPTIONS");
    }

    #[test]
    fn test_options_with_cors() {
        let resp = build_options_response(&http_config(true));
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert_eq!(resp.headers()["access-control-allow-methods"], "GET, HEAD, OPTIONS");
    }
}
