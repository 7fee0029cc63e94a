//! Request path canonicalization
//!
//! Resolves `.` and `..` segments and collapses repeated slashes before
//! routing. A non-canonical request is redirected instead of dispatched, so
//! the file handlers never see a path that climbs out of their root.

/// Canonical form of a request path; a trailing slash is kept
pub fn canonical_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    let mut clean = String::with_capacity(path.len() + 1);
    for segment in &segments {
        clean.push('/');
        clean.push_str(segment);
    }

    if clean.is_empty() || path.ends_with('/') {
        clean.push('/');
    }
    clean
}

/// Redirect target when `path` is not canonical, `None` when it already is
pub fn redirect_target(path: &str, query: Option<&str>) -> Option<String> {
    let clean = canonical_path(path);
    if clean == path {
        return None;
    }

    Some(match query {
        Some(q) => format!("{clean}?{q}"),
        None => clean,
    })
}
