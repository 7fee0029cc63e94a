//! `/json`: decode a `TestMessage`, answer with the status the caller asked for

use crate::http::{self, ResponseBody};
use crate::logger;
use http_body_util::BodyExt;
use hyper::body::{Body, Bytes};
use hyper::header::CONTENT_LENGTH;
use hyper::{Request, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Where a requested 301 points
pub const REDIRECT_LOCATION: &str = "/static/banksy.jpg";

const SUCCESS: &str = "SUCCESS";

/// Request and response envelope of the echo endpoint
///
/// Absent fields decode to their zero value, unknown fields are ignored.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestMessage {
    pub method: String,
    pub status: i64,
    pub details: String,
}

pub async fn handle<B>(req: Request<B>) -> Response<ResponseBody>
where
    B: Body<Data = Bytes>,
    B::Error: Display,
{
    let declared_length = req
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();
    logger::log_handler(
        "JSON",
        &format!("{} content-length: {declared_length}", req.method()),
    );

    // `status` stays 200 on the error path too, even though the status line is 400
    let mut response = TestMessage {
        method: req.method().to_string(),
        status: i64::from(StatusCode::OK.as_u16()),
        details: String::new(),
    };

    let request = match decode_message(req.into_body()).await {
        Ok(message) => message,
        Err(e) => {
            logger::log_warning(&format!("Failed to decode JSON body: {e}"));
            response.details = e;
            return http::build_json_response(StatusCode::BAD_REQUEST, &response);
        }
    };
    logger::log_debug(&format!("Decoded {request:?}"));

    if request.status == i64::from(StatusCode::MOVED_PERMANENTLY.as_u16()) {
        return http::build_redirect_response(REDIRECT_LOCATION);
    }

    let Some(status) = u16::try_from(request.status)
        .ok()
        .and_then(|code| StatusCode::from_u16(code).ok())
    else {
        logger::log_error(&format!(
            "Requested status {} cannot be sent on a status line",
            request.status
        ));
        return http::build_empty_response(StatusCode::INTERNAL_SERVER_ERROR);
    };

    response.details = SUCCESS.to_string();
    http::build_json_response(status, &response)
}

/// Decode the first JSON value of the body; trailing bytes are ignored
pub async fn decode_message<B>(body: B) -> Result<TestMessage, String>
where
    B: Body<Data = Bytes>,
    B::Error: Display,
{
    let bytes = body
        .collect()
        .await
        .map_err(|e| e.to_string())?
        .to_bytes();

    serde_json::Deserializer::from_slice(&bytes)
        .into_iter::<TestMessage>()
        .next()
        .unwrap_or_else(|| Err(<serde_json::Error as serde::de::Error>::custom("EOF")))
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::Full;
    use hyper::Method;

    fn post(body: impl Into<String>) -> Request<Full<Bytes>> {
        let body = body.into();
        Request::builder()
            .method(Method::POST)
            .uri("/json")
            .header("Content-Length", body.len())
            .body(Full::new(Bytes::from(body)))
            .unwrap()
    }

    async fn into_message(resp: Response<ResponseBody>) -> TestMessage {
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(body.last(), Some(&b'\n'));
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_echoes_requested_status() {
        for code in [200_u16, 201, 404, 418, 500] {
            let body = format!(r#"{{"method":"GET","status":{code},"details":"x"}}"#);
            let resp = handle(post(body)).await;
            assert_eq!(resp.status().as_u16(), code);

            let message = into_message(resp).await;
            assert_eq!(message.method, "POST");
            assert_eq!(message.status, 200);
            assert_eq!(message.details, "SUCCESS");
        }
    }

    #[tokio::test]
    async fn test_nonsensical_status_is_not_validated() {
        let resp = handle(post(r#"{"status":999}"#)).await;
        assert_eq!(resp.status().as_u16(), 999);
        assert_eq!(into_message(resp).await.details, "SUCCESS");
    }

    #[tokio::test]
    async fn test_301_redirects_without_body() {
        let resp = handle(post(r#"{"method":"POST","status":301,"details":""}"#)).await;

        assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(resp.headers()["location"], REDIRECT_LOCATION);
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_json() {
        let resp = handle(post(r#"{"status": "two hundred"}"#)).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let message = into_message(resp).await;
        assert_eq!(message.status, 200);
        assert_eq!(message.method, "POST");
        assert!(
            message.details.starts_with("invalid type: string"),
            "unexpected details: {}",
            message.details
        );
    }

    #[tokio::test]
    async fn test_empty_body_is_eof() {
        let resp = handle(post("")).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(into_message(resp).await.details, "EOF");
    }

    #[tokio::test]
    async fn test_missing_status_cannot_be_sent() {
        // Zero value of `status` is not a valid status line
        let resp = handle(post(r#"{"details":"no status"}"#)).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_decode_ignores_unknown_and_trailing() {
        let message = decode_message(Full::new(Bytes::from_static(
            br#"{"status":204,"extra":true} trailing"#,
        )))
        .await
        .unwrap();
        assert_eq!(
            message,
            TestMessage {
                method: String::new(),
                status: 204,
                details: String::new(),
            }
        );
    }
}
