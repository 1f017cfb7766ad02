//! # Scribe
//!
//! OpenAPI documentation for routed HTTP handlers.
//!
//! Routes are declared once with their parameters, responses, auth and
//! callbacks. Scribe records them, dispatches requests to bound handlers, and
//! compiles everything into an OpenAPI 3.1 document served next to a Swagger
//! UI page.
//!
//! ## Quick Start
//!
//! ```rust
//! use scribe::prelude::*;
//!
//! #[derive(serde::Serialize, JsonSchema)]
//! struct Pet {
//!     id: u64,
//!     name: String,
//! }
//!
//! let mut pets = Router::new();
//! let show = pets.get(
//!     "/<int:id>",
//!     RouteOptions::new().summary("Show a pet").returns::<Pet>(200),
//! );
//!
//! let mut api = Api::new(ApiOptions::new().title("Pet Store").prefix("/api"));
//! api.add_router(&pets, "/pets");
//! api.bind(&show, |ctx: RequestContext| async move {
//!     let id = ctx.param_as::<u64>("id").unwrap_or_default();
//!     json(StatusCode::OK, &Pet { id, name: "Rex".into() })
//! });
//!
//! let doc = api.openapi().unwrap();
//! assert!(doc.paths.contains_key("/api/pets/{id}"));
//! assert_eq!(api.docs_path().as_deref(), Some("/api/docs/"));
//! ```
//!
//! ## Crates
//!
//! - [`core`]: route metadata, path translation, auth schemes, schema adapters
//! - [`router`]: the dispatch table
//! - [`docs`]: document compilation and the Swagger UI page
//! - [`config`]: file and environment configuration
//! - [`telemetry`]: logging setup

#![doc(html_root_url = "https://docs.rs/scribe/0.1.0")]

mod api;
mod handler;
mod mount;

pub use api::{Api, ApiOptions};
pub use handler::{empty, error, html, json, text, Handler, HandlerFuture, RequestContext};

pub use scribe_config as config;
pub use scribe_core as core;
pub use scribe_docs as docs;
pub use scribe_router as router;
pub use scribe_telemetry as telemetry;

/// Prelude module for convenient imports.
///
/// ```rust
/// use scribe::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{empty, error, html, json, text, Api, ApiOptions, Handler, RequestContext};

    pub use scribe_core::schemars::JsonSchema;
    pub use scribe_core::{
        ApiKeyAuth, AuthSetting, BasicAuth, BearerAuth, Callback, HttpMethod, ModelField,
        ResponseSpec, RouteBinding, RouteOptions, Router,
    };

    pub use http::StatusCode;
}
