//! Per-path method table.

use http::Method;

use crate::RouteId;

/// Maps the supported HTTP methods to route ids for a single path.
///
/// Registering the same method twice keeps the later route, mirroring the
/// last-registration-wins behaviour of the generated document.
///
/// # Example
///
/// ```rust
/// use scribe_router::{MethodRouter, RouteId};
/// use http::Method;
///
/// let list = RouteId::next();
/// let create = RouteId::next();
/// let router = MethodRouter::new().get(list).post(create);
///
/// assert_eq!(router.route(&Method::GET), Some(list));
/// assert_eq!(router.route(&Method::DELETE), None);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MethodRouter {
    get: Option<RouteId>,
    post: Option<RouteId>,
    put: Option<RouteId>,
    patch: Option<RouteId>,
    delete: Option<RouteId>,
}

impl MethodRouter {
    /// Creates an empty method table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a GET route.
    #[must_use]
    pub fn get(mut self, route: RouteId) -> Self {
        self.get = Some(route);
        self
    }

    /// Registers a POST route.
    #[must_use]
    pub fn post(mut self, route: RouteId) -> Self {
        self.post = Some(route);
        self
    }

    /// Registers a PUT route.
    #[must_use]
    pub fn put(mut self, route: RouteId) -> Self {
        self.put = Some(route);
        self
    }

    /// Registers a PATCH route.
    #[must_use]
    pub fn patch(mut self, route: RouteId) -> Self {
        self.patch = Some(route);
        self
    }

    /// Registers a DELETE route.
    #[must_use]
    pub fn delete(mut self, route: RouteId) -> Self {
        self.delete = Some(route);
        self
    }

    /// Registers a route for `method`. Unsupported methods are ignored and
    /// reported through the return value.
    pub fn set(&mut self, method: &Method, route: RouteId) -> bool {
        let slot = match *method {
            Method::GET => &mut self.get,
            Method::POST => &mut self.post,
            Method::PUT => &mut self.put,
            Method::PATCH => &mut self.patch,
            Method::DELETE => &mut self.delete,
            _ => return false,
        };
        *slot = Some(route);
        true
    }

    /// Returns the route registered for `method`.
    #[must_use]
    pub fn route(&self, method: &Method) -> Option<RouteId> {
        match *method {
            Method::GET => self.get,
            Method::POST => self.post,
            Method::PUT => self.put,
            Method::PATCH => self.patch,
            Method::DELETE => self.delete,
            _ => None,
        }
    }

    /// Methods that have a route, for `Allow` headers.
    #[must_use]
    pub fn allowed_methods(&self) -> Vec<Method> {
        [
            (Method::GET, self.get),
            (Method::POST, self.post),
            (Method::PUT, self.put),
            (Method::PATCH, self.patch),
            (Method::DELETE, self.delete),
        ]
        .into_iter()
        .filter_map(|(method, route)| route.map(|_| method))
        .collect()
    }

    /// Merges `other` into `self`; routes in `other` take precedence.
    pub fn merge(&mut self, other: Self) {
        self.get = other.get.or(self.get);
        self.post = other.post.or(self.post);
        self.put = other.put.or(self.put);
        self.patch = other.patch.or(self.patch);
        self.delete = other.delete.or(self.delete);
    }
}
