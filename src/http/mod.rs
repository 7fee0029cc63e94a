//! HTTP protocol layer module
//!
//! Response builders, MIME detection and query parsing shared by the handlers.

pub mod mime;
pub mod query;
pub mod response;

// Re-export commonly used types
pub use query::query_param;
pub use response::{
    apply_headers, build_404_response, build_empty_response, build_file_response,
    build_json_response, build_redirect_response, empty, full, ResponseBody, StaticHeader,
    ALLOW_ANY_ORIGIN,
};
