//! Test web server for browser and HTTP client test suites.
//!
//! Serves a fixed set of fixture routes (`/json`, `/proxy`, `/cors`,
//! `/static/`) plus a browser asset root, on one plain-HTTP listener.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod routing;
pub mod server;
