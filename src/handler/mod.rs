//! Request handler module
//!
//! The router and the five route handlers: JSON echo, proxy, CORS file,
//! static files and browser assets.

pub mod cors;
pub mod json_echo;
pub mod proxy;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
