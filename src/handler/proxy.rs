//! `/proxy?url=...`: single-hop GET relay

use crate::config::ProxyClient;
use crate::http::{self, ResponseBody, StaticHeader, ALLOW_ANY_ORIGIN};
use crate::logger;
use http_body_util::{BodyExt, Empty};
use hyper::body::{Bytes, Incoming};
use hyper::header::{HeaderMap, HeaderValue, CONTENT_LENGTH, LOCATION};
use hyper::http::request::Parts;
use hyper::{Request, Response, StatusCode, Uri};
use url::Url;

/// Fixed header sent upstream. Not `Authorization`, and not a credential.
pub const UPSTREAM_AUTH_HEADER: StaticHeader = ("Authentication", "BEARER");

/// Shorter `url` values are rejected with 400
pub const MIN_URL_LEN: usize = 4;

/// Upstream requests per proxied call, redirects included
pub const MAX_REDIRECTS: usize = 10;

/// Framing headers the listener sets itself
const HOP_BY_HOP: [&str; 3] = ["connection", "keep-alive", "transfer-encoding"];

// -- Errors

#[derive(Debug)]
pub enum ProxyError {
    InvalidUrl(hyper::http::Error),
    Transport(hyper_util::client::legacy::Error),
    Redirect(String),
}

impl std::error::Error for ProxyError {}

impl core::fmt::Display for ProxyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidUrl(e) => write!(f, "invalid upstream URL: {e}"),
            Self::Transport(e) => write!(f, "upstream request failed: {e:?}"),
            Self::Redirect(reason) => write!(f, "upstream redirect failed: {reason}"),
        }
    }
}

// -- Handler

pub async fn handle(parts: &Parts, client: &ProxyClient) -> Response<ResponseBody> {
    let target = http::query_param(parts.uri.query(), "url");
    logger::log_handler("Proxy", target.as_deref().unwrap_or("-"));

    let Some(target) = target.filter(|url| url.len() >= MIN_URL_LEN) else {
        return http::build_empty_response(StatusCode::BAD_REQUEST);
    };

    match forward(&target, client).await {
        Ok(upstream) => relay(upstream),
        Err(err @ ProxyError::InvalidUrl(_)) => {
            logger::log_error(&err.to_string());
            http::build_empty_response(StatusCode::INTERNAL_SERVER_ERROR)
        }
        Err(err @ (ProxyError::Transport(_) | ProxyError::Redirect(_))) => {
            // Nothing written yet: the caller gets a bare 200
            logger::log_error(&err.to_string());
            http::build_empty_response(StatusCode::OK)
        }
    }
}

/// Outbound GET carrying the fixed upstream header
pub fn build_upstream_request(url: &str) -> Result<Request<Empty<Bytes>>, ProxyError> {
    Request::get(url)
        .header(UPSTREAM_AUTH_HEADER.0, UPSTREAM_AUTH_HEADER.1)
        .body(Empty::new())
        .map_err(ProxyError::InvalidUrl)
}

/// Send the GET, following 3xx responses until a final one arrives
async fn forward(url: &str, client: &ProxyClient) -> Result<Response<Incoming>, ProxyError> {
    let mut request = build_upstream_request(url)?;

    for _ in 0..MAX_REDIRECTS {
        let current = request.uri().clone();
        let response = client.request(request).await.map_err(ProxyError::Transport)?;

        let Some(next) = redirect_location(&current, &response)? else {
            return Ok(response);
        };
        logger::log_debug(&format!("Upstream {} -> {next}", response.status()));

        request = build_upstream_request(next.as_str())
            .map_err(|e| ProxyError::Redirect(e.to_string()))?;
    }

    Err(ProxyError::Redirect(format!(
        "stopped after {MAX_REDIRECTS} redirects"
    )))
}

/// Absolute `Location` of a redirect response, `None` for anything else
fn redirect_location(current: &Uri, response: &Response<Incoming>) -> Result<Option<Url>, ProxyError> {
    let status = response.status();
    let is_redirect = matches!(
        status,
        StatusCode::MOVED_PERMANENTLY
            | StatusCode::FOUND
            | StatusCode::SEE_OTHER
            | StatusCode::TEMPORARY_REDIRECT
            | StatusCode::PERMANENT_REDIRECT
    );
    // A redirect without `Location` is relayed as-is
    let Some(location) = response.headers().get(LOCATION).filter(|_| is_redirect) else {
        return Ok(None);
    };

    let location = location
        .to_str()
        .map_err(|e| ProxyError::Redirect(format!("unreadable Location header: {e}")))?;
    resolve_location(current, location).map(Some)
}

/// `location` resolved against the URI that produced it
fn resolve_location(current: &Uri, location: &str) -> Result<Url, ProxyError> {
    Url::parse(&current.to_string())
        .and_then(|base| base.join(location))
        .map_err(|e| ProxyError::Redirect(format!("bad Location '{location}': {e}")))
}

/// Upstream status and body as-is, first value of each header only
fn relay(upstream: Response<Incoming>) -> Response<ResponseBody> {
    let (parts, body) = upstream.into_parts();
    logger::log_debug(&format!("Upstream {} headers: {:?}", parts.status, parts.headers));

    let mut response = Response::new(body.boxed_unsync());
    *response.status_mut() = parts.status;
    *response.headers_mut() = first_values(&parts.headers);

    if let Some(length) = declared_length(&parts.headers) {
        response
            .headers_mut()
            .insert(CONTENT_LENGTH, HeaderValue::from(length));
    }
    http::apply_headers(&mut response, &[ALLOW_ANY_ORIGIN]);
    response
}

fn first_values(headers: &HeaderMap) -> HeaderMap {
    let mut copied = HeaderMap::with_capacity(headers.keys_len());
    for name in headers.keys() {
        if HOP_BY_HOP.contains(&name.as_str()) {
            continue;
        }
        if let Some(value) = headers.get(name) {
            copied.insert(name.clone(), value.clone());
        }
    }
    copied
}

/// Length the upstream declared, `None` for chunked or close-delimited bodies
fn declared_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}
