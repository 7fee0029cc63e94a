//! Routing module
//!
//! - Route table with exact, prefix and catch-all rules
//! - Path canonicalization ahead of dispatch

mod canonical;
mod matcher;

pub use canonical::{canonical_path, redirect_target};
pub use matcher::{match_route, subtree_redirect, PathPattern, Route, RouteRule, ROUTE_TABLE};
