//! Route matching module
//!
//! Maps a request path to one of the five handlers through an explicit table.
//! Exact rules win over prefix rules, prefix rules over the catch-all,
//! whatever their position in the table.

/// Handler selected for a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Json,
    Proxy,
    Cors,
    Static,
    Browser,
}

impl Route {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Proxy => "Proxy",
            Self::Cors => "CORS",
            Self::Static => "Static",
            Self::Browser => "Browser",
        }
    }
}

/// Path condition of a route rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathPattern {
    Exact(&'static str),
    Prefix(&'static str),
    CatchAll,
}

impl PathPattern {
    const fn precedence(self) -> u8 {
        match self {
            Self::Exact(_) => 0,
            Self::Prefix(_) => 1,
            Self::CatchAll => 2,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RouteRule {
    pub pattern: PathPattern,
    pub route: Route,
}

/// The server's routes
pub const ROUTE_TABLE: &[RouteRule] = &[
    RouteRule {
        pattern: PathPattern::CatchAll,
        route: Route::Browser,
    },
    RouteRule {
        pattern: PathPattern::Prefix("/static/"),
        route: Route::Static,
    },
    RouteRule {
        pattern: PathPattern::Exact("/cors"),
        route: Route::Cors,
    },
    RouteRule {
        pattern: PathPattern::Exact("/proxy"),
        route: Route::Proxy,
    },
    RouteRule {
        pattern: PathPattern::Exact("/json"),
        route: Route::Json,
    },
];

/// Check if a path matches a single pattern
pub fn match_path(pattern: PathPattern, path: &str) -> bool {
    match pattern {
        PathPattern::Exact(exact) => path == exact,
        PathPattern::Prefix(prefix) => path.starts_with(prefix),
        PathPattern::CatchAll => true,
    }
}

/// First matching route, exact before prefix before catch-all
pub fn match_route(path: &str, table: &[RouteRule]) -> Option<Route> {
    (0..=PathPattern::CatchAll.precedence()).find_map(|tier| {
        table
            .iter()
            .filter(|rule| rule.pattern.precedence() == tier)
            .find(|rule| match_path(rule.pattern, path))
            .map(|rule| rule.route)
    })
}

/// Subtree a path names without its trailing slash, e.g. `/static` -> `/static/`
///
/// `None` when an exact rule claims the path itself.
pub fn subtree_redirect(path: &str, table: &[RouteRule]) -> Option<&'static str> {
    if table
        .iter()
        .any(|rule| matches!(rule.pattern, PathPattern::Exact(exact) if exact == path))
    {
        return None;
    }
    table.iter().find_map(|rule| match rule.pattern {
        PathPattern::Prefix(prefix) if prefix.strip_suffix('/') == Some(path) => Some(prefix),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_path_exact() {
        let pattern = PathPattern::Exact("/cors");
        assert!(match_path(pattern, "/cors"));
        assert!(!match_path(pattern, "/cors/"));
        assert!(!match_path(pattern, "/corsx"));
    }

    #[test]
    fn test_match_path_prefix() {
        let pattern = PathPattern::Prefix("/static/");
        assert!(match_path(pattern, "/static/"));
        assert!(match_path(pattern, "/static/img/banksy.jpg"));
        assert!(!match_path(pattern, "/static"));
        assert!(!match_path(pattern, "/staticfile"));
    }

    #[test]
    fn test_route_table() {
        let cases = [
            ("/json", Route::Json),
            ("/proxy", Route::Proxy),
            ("/cors", Route::Cors),
            ("/static/banksy.jpg", Route::Static),
            ("/static/", Route::Static),
            ("/", Route::Browser),
            ("/index.html", Route::Browser),
            ("/jsonx", Route::Browser),
            ("/cors/", Route::Browser),
            ("/static", Route::Browser),
        ];
        for (path, expected) in cases {
            assert_eq!(match_route(path, ROUTE_TABLE), Some(expected), "path {path}");
        }
    }

    #[test]
    fn test_subtree_redirect() {
        assert_eq!(subtree_redirect("/static", ROUTE_TABLE), Some("/static/"));
        assert_eq!(subtree_redirect("/static/", ROUTE_TABLE), None);
        assert_eq!(subtree_redirect("/cors", ROUTE_TABLE), None);
        assert_eq!(subtree_redirect("/", ROUTE_TABLE), None);
        assert_eq!(subtree_redirect("", ROUTE_TABLE), None);

        let table = [
            RouteRule {
                pattern: PathPattern::Prefix("/api/"),
                route: Route::Static,
            },
            RouteRule {
                pattern: PathPattern::Exact("/api"),
                route: Route::Json,
            },
        ];
        assert_eq!(subtree_redirect("/api", &table), None);
    }

    #[test]
    fn test_precedence_ignores_table_order() {
        // A prefix rule listed first must not shadow a later exact rule
        let table = [
            RouteRule {
                pattern: PathPattern::Prefix("/json"),
                route: Route::Static,
            },
            RouteRule {
                pattern: PathPattern::Exact("/json"),
                route: Route::Json,
            },
        ];
        assert_eq!(match_route("/json", &table), Some(Route::Json));
        assert_eq!(match_route("/json/more", &table), Some(Route::Static));
        assert_eq!(match_route("/other", &table), None);
    }
}
