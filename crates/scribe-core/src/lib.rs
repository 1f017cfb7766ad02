//! # Scribe Core
//!
//! Route metadata and the pieces an OpenAPI document is built from.
//!
//! ## Overview
//!
//! - [`path`]: translation from native paths (`/users/<int:id>`) to OpenAPI
//!   templates (`/users/{id}`)
//! - [`ModelField`]: a typed parameter or body with a lazily resolved schema
//! - [`AuthScheme`]: pluggable security scheme descriptions
//! - [`Operation`]: one (method, path) pair and everything declared about it
//! - [`Router`]: an ordered, mergeable collection of operations
//! - [`TypeSchemaAdapter`]: batched JSON Schema generation, with
//!   [`SchemarsAdapter`] as the default
//! - [`openapi`]: the OpenAPI 3.1 object model
//!
//! ## Example
//!
//! ```rust
//! use scribe_core::{ModelField, RouteOptions, Router};
//!
//! let mut router = Router::new();
//! router.get(
//!     "/users/<int:id>",
//!     RouteOptions::new()
//!         .summary("Fetch a user")
//!         .param(ModelField::query::<bool>("verbose").optional()),
//! );
//!
//! let op = &router.operations()[0];
//! assert_eq!(op.get_openapi_path(), "/users/{id}");
//! ```

mod adapter;
mod auth;
mod error;
mod field;
mod method;
mod operation;
mod router;

pub mod openapi;
pub mod path;

pub use adapter::{
    GeneratedDefinitions, SchemaInput, SchemarsAdapter, TypeSchemaAdapter, DEFAULT_REF_TEMPLATE,
};
pub use auth::{ApiKeyAuth, ApiKeyLocation, AuthScheme, AuthSetting, BasicAuth, BearerAuth};
pub use error::{CoreError, CoreResult};
pub use field::{CoreSchema, FieldKey, FieldMode, ModelField};
pub use method::HttpMethod;
pub use operation::{default_description, Callback, Operation, ResponseSpec, RouteOptions};
pub use router::{RouteBinding, Router};
pub use scribe_router::RouteId;

/// Re-export so callers can derive `JsonSchema` without a direct dependency.
pub use schemars;
