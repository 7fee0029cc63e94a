//! `/cors`: one fixed file behind permissive CORS headers

use crate::config::FilesConfig;
use crate::handler::static_files;
use crate::http::{self, ResponseBody, StaticHeader, ALLOW_ANY_ORIGIN};
use crate::logger;
use hyper::http::request::Parts;
use hyper::{Method, Response, StatusCode};
use std::path::Path;

/// Sent on every `/cors` response. The second name really is singular.
pub const CORS_HEADERS: [StaticHeader; 2] = [
    ALLOW_ANY_ORIGIN,
    ("Access-Control-Allow-Header", "Authorization"),
];

pub async fn handle(parts: &Parts, files: &FilesConfig) -> Response<ResponseBody> {
    logger::log_handler("CORS", parts.method.as_str());

    let mut response = if parts.method == Method::OPTIONS {
        // Preflight
        http::build_empty_response(StatusCode::NO_CONTENT)
    } else {
        match static_files::load_file(Path::new(&files.cors_file)).await {
            Some(file) => file.into_response(),
            None => http::build_404_response(),
        }
    };

    http::apply_headers(&mut response, &CORS_HEADERS);
    response
}
