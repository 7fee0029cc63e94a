//! HTTP response building module
//!
//! Builders for the handful of response shapes the handlers produce.
//! Every builder falls back to an empty response instead of panicking.

use http_body_util::{combinators::UnsyncBoxBody, BodyExt, Empty, Full};
use hyper::body::Bytes;
use hyper::header::{HeaderName, HeaderValue};
use hyper::{Response, StatusCode};
use serde::Serialize;

/// Body type shared by file, JSON and proxied responses
pub type ResponseBody = UnsyncBoxBody<Bytes, hyper::Error>;

/// Static header pair, e.g. a CORS header
pub type StaticHeader = (&'static str, &'static str);

pub const ALLOW_ANY_ORIGIN: StaticHeader = ("Access-Control-Allow-Origin", "*");

pub fn full(data: impl Into<Bytes>) -> ResponseBody {
    Full::new(data.into()).map_err(|never| match never {}).boxed_unsync()
}

pub fn empty() -> ResponseBody {
    Empty::<Bytes>::new().map_err(|never| match never {}).boxed_unsync()
}

/// Add static headers to an already built response
pub fn apply_headers<B>(response: &mut Response<B>, headers: &[StaticHeader]) {
    for &(name, value) in headers {
        match HeaderName::from_bytes(name.as_bytes()) {
            Ok(header) => {
                response
                    .headers_mut()
                    .insert(header, HeaderValue::from_static(value));
            }
            Err(e) => crate::logger::log_error(&format!("Invalid header name '{name}': {e}")),
        }
    }
}

/// Status line only, no body
pub fn build_empty_response(status: StatusCode) -> Response<ResponseBody> {
    let mut response = Response::new(empty());
    *response.status_mut() = status;
    response
}

/// Build 404 Not Found response (empty body)
pub fn build_404_response() -> Response<ResponseBody> {
    build_empty_response(StatusCode::NOT_FOUND)
}

/// Build 301 redirect response with an empty body
pub fn build_redirect_response(location: &str) -> Response<ResponseBody> {
    Response::builder()
        .status(StatusCode::MOVED_PERMANENTLY)
        .header("Location", location)
        .body(empty())
        .unwrap_or_else(|e| {
            log_build_error("301", &e);
            build_empty_response(StatusCode::MOVED_PERMANENTLY)
        })
}

/// Serialize `value` as one line of JSON
pub fn build_json_response<T: Serialize>(status: StatusCode, value: &T) -> Response<ResponseBody> {
    let mut body = match serde_json::to_vec(value) {
        Ok(body) => body,
        Err(e) => {
            crate::logger::log_error(&format!("Failed to encode JSON response: {e}"));
            return build_empty_response(status);
        }
    };
    body.push(b'\n');

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Content-Length", body.len())
        .body(full(body))
        .unwrap_or_else(|e| {
            log_build_error("JSON", &e);
            build_empty_response(status)
        })
}

/// Build 200 response for a file; `Content-Length` is the size reported by the filesystem
pub fn build_file_response(
    data: Vec<u8>,
    file_size: u64,
    content_type: &str,
) -> Response<ResponseBody> {
    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", content_type)
        .header("Content-Length", file_size)
        .body(full(data))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            build_empty_response(StatusCode::INTERNAL_SERVER_ERROR)
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_bytes(response: Response<ResponseBody>) -> Bytes {
        response.into_body().collect().await.unwrap().to_bytes()
    }

    #[tokio::test]
    async fn test_json_response_ends_with_newline() {
        let resp = build_json_response(StatusCode::ACCEPTED, &serde_json::json!({"a": 1}));
        assert_eq!(resp.status(), StatusCode::ACCEPTED);
        assert_eq!(resp.headers()["content-type"], "application/json");
        assert_eq!(resp.headers()["content-length"], "8");
        assert_eq!(body_bytes(resp).await, Bytes::from_static(b"{\"a\":1}\n"));
    }

    #[tokio::test]
    async fn test_redirect_has_location_and_no_body() {
        let resp = build_redirect_response("/static/banksy.jpg");
        assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(resp.headers()["location"], "/static/banksy.jpg");
        assert!(body_bytes(resp).await.is_empty());
    }

    #[test]
    fn test_apply_headers_keeps_misspelled_name() {
        let mut resp = build_404_response();
        apply_headers(
            &mut resp,
            &[ALLOW_ANY_ORIGIN, ("Access-Control-Allow-Header", "Authorization")],
        );
        assert_eq!(resp.headers()["access-control-allow-origin"], "*");
        assert_eq!(resp.headers()["access-control-allow-header"], "Authorization");
    }
}
