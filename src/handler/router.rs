//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: path canonicalization, route
//! matching, dispatch and the access log line.

use crate::config::AppState;
use crate::handler::{cors, json_echo, proxy, static_files};
use crate::http::{self, ResponseBody};
use crate::logger::{self, AccessLogEntry};
use crate::routing::{self, Route, ROUTE_TABLE};
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::fmt::Display;
use std::net::SocketAddr;
use std::sync::atomic::Ordering;
use std::sync::Arc;

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    remote_addr: SocketAddr,
) -> Result<Response<ResponseBody>, Infallible>
where
    B: Body<Data = Bytes>,
    B::Error: Display,
{
    let mut access_entry = state.cached_access_log.load(Ordering::Relaxed).then(|| {
        AccessLogEntry::begin(
            remote_addr,
            req.method(),
            req.uri(),
            req.version(),
            req.headers(),
        )
    });

    let response = route_request(req, &state).await;

    if let Some(entry) = access_entry.as_mut() {
        entry.finish(response.status().as_u16(), response.body().size_hint().exact());
        logger::log_access(entry, &state.config.logging.access_log_format);
    }
    Ok(response)
}

/// Redirect non-canonical paths, otherwise dispatch through the route table
pub async fn route_request<B>(req: Request<B>, state: &AppState) -> Response<ResponseBody>
where
    B: Body<Data = Bytes>,
    B::Error: Display,
{
    let (parts, body) = req.into_parts();
    let path = parts.uri.path();

    // CONNECT and `OPTIONS *` have no path to clean
    if parts.method != Method::CONNECT && path != "*" {
        if let Some(target) = routing::redirect_target(path, parts.uri.query()) {
            logger::log_handler("Redirect", &format!("{path} -> {target}"));
            return http::build_redirect_response(&target);
        }

        // Subtree root named without its slash
        if let Some(subtree) = routing::subtree_redirect(path, ROUTE_TABLE) {
            let target = match parts.uri.query() {
                Some(q) => format!("{subtree}?{q}"),
                None => subtree.to_string(),
            };
            logger::log_handler("Redirect", &format!("{path} -> {target}"));
            return http::build_redirect_response(&target);
        }
    }

    let route = routing::match_route(path, ROUTE_TABLE).unwrap_or(Route::Browser);
    logger::log_debug(&format!("{} {} -> {}", parts.method, parts.uri, route.name()));

    let files = &state.config.files;
    match route {
        Route::Json => json_echo::handle(Request::from_parts(parts, body)).await,
        Route::Proxy => proxy::handle(&parts, &state.client).await,
        Route::Cors => cors::handle(&parts, files).await,
        Route::Static => static_files::serve_static(&parts, files).await,
        Route::Browser => static_files::serve_browser(&parts, files).await,
    }
}
