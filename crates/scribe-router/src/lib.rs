//! Routing table for scribe's native path syntax.
//!
//! This crate plays the part of the host framework's dispatcher: it owns the
//! mapping from request paths to route ids. Route paths use typed
//! placeholders:
//!
//! ```text
//! /users/<int:id>            integer segment
//! /users/<name>              any segment
//! /items/<uuid:item_id>      UUID segment
//! /files/<path:rest>         the rest of the path
//! ```
//!
//! # Example
//!
//! ```rust
//! use scribe_router::{RouteId, RouteTable};
//! use http::Method;
//!
//! let mut table = RouteTable::new();
//! let get_user = RouteId::next();
//! table.route(&Method::GET, "/users/<int:id>", get_user).unwrap();
//!
//! let m = table.match_route(&Method::GET, "/users/7").unwrap();
//! assert_eq!(m.route_id, get_user);
//! assert_eq!(m.params.parse::<i64>("id"), Some(7));
//!
//! // Converter mismatch: no route.
//! assert!(table.match_route(&Method::GET, "/users/seven").is_none());
//! ```

mod converter;
mod method_router;
mod node;
mod params;
mod table;

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

pub use converter::{is_identifier, Converter, Placeholder};
pub use method_router::MethodRouter;
pub use node::{Node, SegmentKind};
pub use params::Params;
pub use table::RouteTable;

/// Process-unique identity of a registered route.
///
/// Ids are handed out once per registration and survive path rewriting, so
/// a route merged under a prefix still dispatches to the same handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteId(u64);

static NEXT_ROUTE_ID: AtomicU64 = AtomicU64::new(1);

impl RouteId {
    /// Allocates a fresh id.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_ROUTE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw numeric value.
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "route#{}", self.0)
    }
}

/// A matched route with its captured parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    /// The route that matched.
    pub route_id: RouteId,
    /// Captured path parameters.
    pub params: Params,
}

impl RouteMatch {
    /// Creates a new route match.
    #[must_use]
    pub fn new(route_id: RouteId, params: Params) -> Self {
        Self { route_id, params }
    }
}

/// Errors raised while inserting routes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// A `<path:...>` placeholder was followed by more segments.
    #[error("catch-all placeholder must be the last segment in {path}")]
    WildcardNotLast {
        /// The offending route path.
        path: String,
    },

    /// The method cannot be routed.
    #[error("unsupported HTTP method: {method}")]
    UnsupportedMethod {
        /// The rejected method.
        method: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_ids_are_unique() {
        let a = RouteId::next();
        let b = RouteId::next();
        assert_ne!(a, b);
        assert!(b.get() > a.get());
    }

    #[test]
    fn test_route_id_display() {
        let id = RouteId::next();
        assert_eq!(id.to_string(), format!("route#{}", id.get()));
    }
}
