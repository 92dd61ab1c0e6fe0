//! Declared route table.
//!
//! Routes are private unless marked `public`. The Leptos router renders the
//! views; this table is what the navigation guard consults, so the two must
//! list the same paths.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

/// Guard-relevant route metadata.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RouteMeta {
    pub public: bool,
    /// Redirect logged-in users away (used by `/login`).
    pub only_when_logged_out: bool,
}

impl RouteMeta {
    pub const PRIVATE: Self = Self { public: false, only_when_logged_out: false };
    pub const PUBLIC: Self = Self { public: true, only_when_logged_out: false };
    pub const LOGGED_OUT_ONLY: Self = Self { public: true, only_when_logged_out: true };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteDef {
    pub name: &'static str,
    /// Pattern with `:param` segments; `*` matches anything.
    pub pattern: &'static str,
    pub meta: RouteMeta,
}

pub const HOME_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";

/// Route table in match order. The catch-all must stay last.
pub const ROUTES: &[RouteDef] = &[
    RouteDef { name: "home", pattern: "/", meta: RouteMeta::PUBLIC },
    RouteDef { name: "about", pattern: "/about", meta: RouteMeta::PUBLIC },
    RouteDef { name: "signup", pattern: "/signup", meta: RouteMeta::PUBLIC },
    RouteDef { name: "login", pattern: "/login", meta: RouteMeta::LOGGED_OUT_ONLY },
    RouteDef { name: "logout", pattern: "/logout", meta: RouteMeta::PRIVATE },
    RouteDef { name: "search", pattern: "/search", meta: RouteMeta::PUBLIC },
    RouteDef { name: "author", pattern: "/author/:id", meta: RouteMeta::PUBLIC },
    RouteDef { name: "profile", pattern: "/profile/:id", meta: RouteMeta::PRIVATE },
    RouteDef { name: "submit", pattern: "/submit", meta: RouteMeta::PRIVATE },
    RouteDef { name: "catch-all", pattern: "*", meta: RouteMeta::PUBLIC },
];

/// Resolve `path` (no query or hash) to its route. Always succeeds thanks to
/// the catch-all.
pub fn match_route(path: &str) -> &'static RouteDef {
    ROUTES
        .iter()
        .find(|route| pattern_matches(route.pattern, path))
        .unwrap_or(&ROUTES[ROUTES.len() - 1])
}

fn pattern_matches(pattern: &str, path: &str) -> bool {
    if pattern == "*" {
        return true;
    }
    let mut pattern_segments = segments(pattern);
    let mut path_segments = segments(path);
    loop {
        match (pattern_segments.next(), path_segments.next()) {
            (None, None) => return true,
            (Some(expected), Some(actual)) => {
                if !expected.starts_with(':') && expected != actual {
                    return false;
                }
            }
            _ => return false,
        }
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

/// Split a full path into its path part, dropping `?query` and `#hash`.
pub fn path_of(full_path: &str) -> &str {
    let end = full_path.find(['?', '#']).unwrap_or(full_path.len());
    &full_path[..end]
}

/// Rebuild a full path from the router's location parts.
///
/// `search` and `hash` arrive with or without their leading `?`/`#`; empty
/// parts are left out.
pub fn full_path(pathname: &str, search: &str, hash: &str) -> String {
    let mut path = pathname.to_owned();
    let search = search.strip_prefix('?').unwrap_or(search);
    if !search.is_empty() {
        path.push('?');
        path.push_str(search);
    }
    let hash = hash.strip_prefix('#').unwrap_or(hash);
    if !hash.is_empty() {
        path.push('#');
        path.push_str(hash);
    }
    path
}
