//! Composable operation collections.

use std::sync::Arc;

use scribe_router::RouteId;

use crate::auth::AuthScheme;
use crate::method::HttpMethod;
use crate::operation::{Operation, RouteOptions};

/// Token returned by route registration.
///
/// The host dispatcher uses it to attach a handler; the router never looks
/// at handlers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteBinding {
    /// Identity of the registered operation.
    pub route_id: RouteId,
    /// Registered method.
    pub method: HttpMethod,
    /// Registered native path.
    pub path: String,
}

/// A flat, ordered list of operations plus a default auth scheme.
///
/// Merging another router copies its operations in with a path prefix, so
/// any depth of nesting flattens to one level.
///
/// # Example
///
/// ```rust
/// use scribe_core::{Router, RouteOptions};
///
/// let mut users = Router::new();
/// users.get("/<int:id>", RouteOptions::new());
///
/// let mut root = Router::new();
/// root.add_router(&users, "/users");
/// assert_eq!(root.operations()[0].path(), "/users/<int:id>");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Router {
    operations: Vec<Operation>,
    auth: Option<Arc<dyn AuthScheme>>,
}

impl Router {
    /// Router without default auth.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Router whose routes use `auth` unless they say otherwise.
    #[must_use]
    pub fn with_auth(auth: Arc<dyn AuthScheme>) -> Self {
        Self {
            operations: Vec::new(),
            auth: Some(auth),
        }
    }

    /// The default auth scheme.
    #[must_use]
    pub fn default_auth(&self) -> Option<&Arc<dyn AuthScheme>> {
        self.auth.as_ref()
    }

    /// Records an operation and returns its binding.
    pub fn add_route(
        &mut self,
        method: HttpMethod,
        path: impl Into<String>,
        options: RouteOptions,
    ) -> RouteBinding {
        let operation = Operation::from_options(method, path, options, self.auth.as_ref());
        let binding = RouteBinding {
            route_id: operation.route_id(),
            method,
            path: operation.path().to_string(),
        };
        tracing::debug!(
            route_id = %binding.route_id,
            method = %method,
            path = %binding.path,
            "registered operation"
        );
        self.operations.push(operation);
        binding
    }

    /// Registers a GET route.
    pub fn get(&mut self, path: impl Into<String>, options: RouteOptions) -> RouteBinding {
        self.add_route(HttpMethod::Get, path, options)
    }

    /// Registers a POST route.
    pub fn post(&mut self, path: impl Into<String>, options: RouteOptions) -> RouteBinding {
        self.add_route(HttpMethod::Post, path, options)
    }

    /// Registers a PUT route.
    pub fn put(&mut self, path: impl Into<String>, options: RouteOptions) -> RouteBinding {
        self.add_route(HttpMethod::Put, path, options)
    }

    /// Registers a PATCH route.
    pub fn patch(&mut self, path: impl Into<String>, options: RouteOptions) -> RouteBinding {
        self.add_route(HttpMethod::Patch, path, options)
    }

    /// Registers a DELETE route.
    pub fn delete(&mut self, path: impl Into<String>, options: RouteOptions) -> RouteBinding {
        self.add_route(HttpMethod::Delete, path, options)
    }

    /// Copies every operation of `child` into this router with `prefix`
    /// prepended to its path. The prefix is concatenated as-is.
    ///
    /// Returns the bindings of the copied operations, in order.
    pub fn add_router(&mut self, child: &Self, prefix: &str) -> Vec<RouteBinding> {
        let start = self.operations.len();
        self.operations
            .extend(child.operations.iter().map(|op| op.with_prefix(prefix)));
        tracing::debug!(
            prefix,
            count = child.operations.len(),
            "merged router"
        );
        self.operations[start..]
            .iter()
            .map(|op| RouteBinding {
                route_id: op.route_id(),
                method: op.method(),
                path: op.path().to_string(),
            })
            .collect()
    }

    /// All operations, in registration and merge order.
    #[must_use]
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Number of operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Whether the router is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}
