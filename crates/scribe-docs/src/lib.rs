//! # Scribe Docs
//!
//! OpenAPI document compilation and the Swagger UI page.
//!
//! - [`DocumentBuilder`] compiles a [`scribe_core::Router`] into an
//!   OpenAPI 3.1 document, resolving every referenced model in one batch so
//!   shared types are defined once under `components.schemas`
//! - [`SwaggerUi`] renders the documentation page that loads that document
//!
//! ## Quick Start
//!
//! ```rust
//! use scribe_core::{RouteOptions, Router};
//! use scribe_docs::{DocumentBuilder, SwaggerUi};
//!
//! let mut router = Router::new();
//! router.get("/health", RouteOptions::new());
//!
//! let json = DocumentBuilder::new()
//!     .title("My API")
//!     .description("Line one.\n    Line two.")
//!     .build_json(&router)
//!     .unwrap();
//! assert!(json.contains(r#""/health""#));
//!
//! let page = SwaggerUi::new("/docs", "My API");
//! assert_eq!(page.spec_path(), "/docs/openapi.json");
//! ```

mod builder;
mod error;
mod swagger;

pub use builder::{collapse_description, DocumentBuilder};
pub use error::{DocsError, DocsResult};
pub use swagger::{DocExpansion, SwaggerUi};
