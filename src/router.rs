//! Path-pattern routing with positional parameter capture.
//!
//! A pattern is either the literal root `/` or a template whose
//! `{name}` placeholders each match one path segment. Patterns compile to
//! anchored regexes at registration time; matching is a pure lookup that
//! returns a fresh capture vector per call, so a shared router never leaks
//! one connection's parameters into another's.

use std::collections::HashMap;
use regex::Regex;
use thiserror::Error;

/// Why a request could not be routed. Both outcomes are recoverable: the
/// dispatcher answers them with the canned 405 and 404 responses.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    /// No route at all is registered for the request's method.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Routes exist for the method, but none accepts the path.
    #[error("Route not found")]
    RouteNotFound,
}

/// A successful match: the bound handler and the placeholder captures in
/// left-to-right pattern order, verbatim (no URL-decoding).
#[derive(Debug)]
pub struct RouteMatch<'a, H> {
    pub handler: &'a H,
    pub params: Vec<String>,
}

/// One registered route: the source pattern, its compiled matcher and the
/// handler payload it is bound to.
#[derive(Debug, Clone)]
struct Route<H> {
    pattern: String,
    matcher: Regex,
    handler: H,
}

/// An ordered table of routes per HTTP method.
///
/// Generic over the handler payload so the matching logic is testable
/// without constructing futures; the server instantiates it with its boxed
/// handler type. Routes are registered once at startup and the table is
/// read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct Router<H> {
    routes: HashMap<String, Vec<Route<H>>>,
}

impl<H> Router<H> {
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
        }
    }

    /// Register a route. The pattern is compiled here, once; match order is
    /// registration order and the first accepting route wins.
    pub fn register(&mut self, method: impl Into<String>, pattern: &str, handler: H) {
        let route = Route {
            pattern: pattern.to_string(),
            matcher: compile_pattern(pattern),
            handler,
        };
        self.routes.entry(method.into()).or_default().push(route);
    }

    /// Match a method and path against the table.
    ///
    /// A method with no registered routes is rejected outright, before any
    /// pattern is inspected. Otherwise the method's routes are scanned in
    /// registration order and the first whose matcher accepts the whole path
    /// wins, yielding its captures as an owned vector.
    pub fn route<'r>(&'r self, method: &str, path: &str) -> Result<RouteMatch<'r, H>, RouteError> {
        let routes = self.routes.get(method).ok_or(RouteError::MethodNotAllowed)?;

        for route in routes {
            if let Some(captures) = route.matcher.captures(path) {
                let params = captures
                    .iter()
                    .skip(1)
                    .flatten()
                    .map(|group| group.as_str().to_string())
                    .collect();
                return Ok(RouteMatch {
                    handler: &route.handler,
                    params,
                });
            }
        }

        Err(RouteError::RouteNotFound)
    }

    /// Iterate over the registered `(method, pattern)` pairs.
    pub fn routes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.routes.iter().flat_map(|(method, routes)| {
            routes
                .iter()
                .map(move |route| (method.as_str(), route.pattern.as_str()))
        })
    }

    /// Total number of registered routes across all methods.
    pub fn len(&self) -> usize {
        self.routes.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Compile a path pattern into an anchored regex.
///
/// The literal root `/` matches only the root path. In any other pattern,
/// each `{identifier}` placeholder becomes a one-segment capture group and
/// the literal characters around it must match exactly, so metacharacters
/// in the pattern text are escaped. The result is anchored on both ends:
/// no prefix or suffix matches.
fn compile_pattern(pattern: &str) -> Regex {
    if pattern == "/" {
        return Regex::new("^/$").expect("Failed to compile path regex");
    }

    let mut source = String::with_capacity(pattern.len() + 8);
    source.push('^');

    let mut rest = pattern;
    while let Some(open) = rest.find('{') {
        let (literal, tail) = rest.split_at(open);
        source.push_str(&regex::escape(literal));
        match tail.find('}') {
            Some(close) => {
                source.push_str("([^/]+)");
                rest = &tail[close + 1..];
            }
            None => {
                // Unterminated placeholder, treat the remainder as literal text.
                source.push_str(&regex::escape(tail));
                rest = "";
            }
        }
    }
    source.push_str(&regex::escape(rest));

    source.push('$');
    Regex::new(&source).expect("Failed to compile path regex")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Router<&'static str> {
        let mut router = Router::new();
        router.register("GET", "/echo/{x}", "echo");
        router.register("GET", "/", "root");
        router
    }

    #[test]
    fn test_root_matches_only_root() {
        let router = table();

        let found = router.route("GET", "/").unwrap();
        assert_eq!(*found.handler, "root");
        assert!(found.params.is_empty());

        assert_eq!(
            router.route("GET", "/other").unwrap_err(),
            RouteError::RouteNotFound
        );
    }

    #[test]
    fn test_placeholder_captures_one_segment() {
        let router = table();

        let found = router.route("GET", "/echo/hi").unwrap();
        assert_eq!(*found.handler, "echo");
        assert_eq!(found.params, vec!["hi".to_string()]);
    }

    #[test]
    fn test_method_gating_short_circuits() {
        let router = table();

        // No PATCH routes at all: rejected before any pattern is tried,
        // even though "/" would match a GET pattern.
        assert_eq!(
            router.route("PATCH", "/").unwrap_err(),
            RouteError::MethodNotAllowed
        );
    }

    #[test]
    fn test_unknown_path() {
        let router = table();

        assert_eq!(
            router.route("GET", "/nope").unwrap_err(),
            RouteError::RouteNotFound
        );
    }

    #[test]
    fn test_patterns_are_anchored() {
        let router = table();

        assert_eq!(
            router.route("GET", "/echo/hi/extra").unwrap_err(),
            RouteError::RouteNotFound
        );
        assert_eq!(router.route("GET", "/echo").unwrap_err(), RouteError::RouteNotFound);
        assert_eq!(router.route("GET", "/echo/").unwrap_err(), RouteError::RouteNotFound);
    }

    #[test]
    fn test_multiple_placeholders_capture_in_order() {
        let mut router = Router::new();
        router.register("GET", "/files/{dir}/{name}", "files");

        let found = router.route("GET", "/files/docs/readme.txt").unwrap();
        assert_eq!(
            found.params,
            vec!["docs".to_string(), "readme.txt".to_string()]
        );
    }

    #[test]
    fn test_first_registered_route_wins() {
        let mut router = Router::new();
        router.register("GET", "/a/{x}", "param");
        router.register("GET", "/a/b", "literal");

        let found = router.route("GET", "/a/b").unwrap();
        assert_eq!(*found.handler, "param");
        assert_eq!(found.params, vec!["b".to_string()]);
    }

    #[test]
    fn test_literal_pattern_text_is_escaped() {
        let mut router = Router::new();
        router.register("GET", "/backup.tar", "backup");

        assert!(router.route("GET", "/backup.tar").is_ok());
        // '.' in the pattern is a literal dot, not a wildcard.
        assert_eq!(
            router.route("GET", "/backupXtar").unwrap_err(),
            RouteError::RouteNotFound
        );
    }

    #[test]
    fn test_captures_are_verbatim() {
        let mut router = Router::new();
        router.register("GET", "/echo/{s}", "echo");

        let found = router.route("GET", "/echo/hello%20world").unwrap();
        assert_eq!(found.params, vec!["hello%20world".to_string()]);
    }

    #[test]
    fn test_concurrent_matches_get_independent_captures() {
        let router = table();

        let first = router.route("GET", "/echo/one").unwrap();
        let second = router.route("GET", "/echo/two").unwrap();

        // Captures are per-call values, not state on the route.
        assert_eq!(first.params, vec!["one".to_string()]);
        assert_eq!(second.params, vec!["two".to_string()]);
    }

    #[test]
    fn test_routes_iterator_and_len() {
        let router = table();

        assert_eq!(router.len(), 2);
        assert!(!router.is_empty());

        let mut pairs: Vec<(&str, &str)> = router.routes().collect();
        pairs.sort();
        assert_eq!(pairs, vec![("GET", "/"), ("GET", "/echo/{x}")]);
    }
}
