//! High-level routing table.

use http::Method;

use crate::method_router::MethodRouter;
use crate::node::Node;
use crate::params::Params;
use crate::{RouteError, RouteId, RouteMatch};

/// Routing table keyed by native route paths.
///
/// # Example
///
/// ```rust
/// use scribe_router::{RouteId, RouteTable};
/// use http::Method;
///
/// let mut table = RouteTable::new();
/// let id = RouteId::next();
/// table.route(&Method::GET, "/users/<int:id>", id).unwrap();
///
/// let found = table.match_route(&Method::GET, "/users/123").unwrap();
/// assert_eq!(found.route_id, id);
/// assert_eq!(found.params.get("id"), Some("123"));
/// ```
///
/// # Route Priority
///
/// 1. **Static segments** (`/users/me`)
/// 2. **Placeholders**, in registration order, if the converter accepts
/// 3. **Catch-all** (`/files/<path:rest>`)
#[derive(Debug, Clone)]
pub struct RouteTable {
    root: Node,
    route_count: usize,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: Node::root(),
            route_count: 0,
        }
    }

    /// Inserts a method table for `path`, merging with existing methods.
    pub fn insert(&mut self, path: &str, methods: MethodRouter) -> Result<(), RouteError> {
        self.root.insert(path, methods)?;
        self.route_count += 1;
        Ok(())
    }

    /// Inserts a single-method route.
    pub fn route(&mut self, method: &Method, path: &str, route: RouteId) -> Result<(), RouteError> {
        let mut methods = MethodRouter::new();
        if !methods.set(method, route) {
            return Err(RouteError::UnsupportedMethod {
                method: method.to_string(),
            });
        }
        self.insert(path, methods)
    }

    /// Matches a request method and path.
    #[must_use]
    pub fn match_route(&self, method: &Method, path: &str) -> Option<RouteMatch> {
        let (methods, params) = self.root.match_path(path)?;
        let route_id = methods.route(method)?;
        Some(RouteMatch::new(route_id, params))
    }

    /// Matches a path regardless of method, e.g. to answer 405.
    #[must_use]
    pub fn match_path(&self, path: &str) -> Option<(&MethodRouter, Params)> {
        self.root.match_path(path)
    }

    /// Number of insertions performed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.route_count
    }

    /// Returns true if nothing was inserted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.route_count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_table_is_empty() {
        let table = RouteTable::new();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
    }

    #[test]
    fn test_method_not_allowed_keeps_path_match() {
        let mut table = RouteTable::new();
        table.route(&Method::GET, "/users", RouteId::next()).unwrap();

        assert!(table.match_route(&Method::POST, "/users").is_none());
        let (methods, _) = table.match_path("/users").unwrap();
        assert_eq!(methods.allowed_methods(), vec![Method::GET]);
    }

    #[test]
    fn test_methods_accumulate_per_path() {
        let (list, create) = (RouteId::next(), RouteId::next());
        let mut table = RouteTable::new();
        table.route(&Method::GET, "/users", list).unwrap();
        table.route(&Method::POST, "/users", create).unwrap();

        assert_eq!(table.match_route(&Method::GET, "/users").unwrap().route_id, list);
        assert_eq!(table.match_route(&Method::POST, "/users").unwrap().route_id, create);
    }

    #[test]
    fn test_duplicate_registration_last_wins() {
        let (first, second) = (RouteId::next(), RouteId::next());
        let mut table = RouteTable::new();
        table.route(&Method::GET, "/users", first).unwrap();
        table.route(&Method::GET, "/users", second).unwrap();

        assert_eq!(table.match_route(&Method::GET, "/users").unwrap().route_id, second);
    }

    #[test]
    fn test_unsupported_method() {
        let mut table = RouteTable::new();
        let err = table
            .route(&Method::OPTIONS, "/users", RouteId::next())
            .unwrap_err();
        assert!(matches!(err, RouteError::UnsupportedMethod { .. }));
        assert!(table.is_empty());
    }
}
