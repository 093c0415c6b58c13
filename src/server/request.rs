use std::borrow::Cow;

/// Prefix of the skeleton route; the remainder of the path is the problem id.
pub const SKELETON_PREFIX: &str = "/api/v1/code/java/";

/// Routes served by [`super::SkeletonService`]
#[derive(Debug, PartialEq, Eq)]
pub enum Route<'a> {
    /// `GET /health`
    Health,
    /// `GET /metrics`
    Metrics,
    /// `GET /api/v1/code/java/{problemId}`, id percent-decoded
    Skeleton(Cow<'a, str>),
    /// Anything else
    NotFound,
}

/// Strip the query string from a request target.
pub fn path_without_query(target: &str) -> &str {
    target.split('?').next().unwrap_or("/")
}

/// Match a request line against the known routes.
///
/// `target` is the raw request target and may carry a query string.
/// Only `GET` is served. An empty id, or one containing `/`, does not match.
///
/// # Example
///
/// ```rust
/// use skeleton_java::server::{resolve_route, Route};
///
/// assert_eq!(resolve_route("GET", "/health"), Route::Health);
/// assert_eq!(
///     resolve_route("GET", "/api/v1/code/java/2-sum"),
///     Route::Skeleton("2-sum".into())
/// );
/// ```
pub fn resolve_route<'a>(method: &str, target: &'a str) -> Route<'a> {
    if method != "GET" {
        return Route::NotFound;
    }
    let path = path_without_query(target);
    match path {
        "/health" => Route::Health,
        "/metrics" => Route::Metrics,
        _ => match path.strip_prefix(SKELETON_PREFIX) {
            Some(id) if !id.is_empty() && !id.contains('/') => {
                Route::Skeleton(urlencoding::decode(id).unwrap_or(Cow::Borrowed(id)))
            }
            _ => Route::NotFound,
        },
    }
}
