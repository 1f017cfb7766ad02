//! Typed configuration for scribe APIs.
//!
//! - TOML and JSON configuration files
//! - Environment variable overrides (`PREFIX__SECTION__KEY`)
//! - Strict parsing (unknown fields are errors)
//! - Layered loading (defaults → file → env)
//!
//! # Configuration File Format
//!
//! ```toml
//! [api]
//! title = "Pet Store"
//! description = "Manages pets."
//! version = "2.1.0"
//! prefix = "/api"
//! docs_url = "/docs"
//!
//! [[api.servers]]
//! url = "https://pets.example.com"
//!
//! [docs]
//! enabled = true
//! doc_expansion = "list"
//!
//! [auth]
//! scheme = "bearer"
//! bearer_format = "JWT"
//!
//! [logging]
//! level = "info"
//! format = "json"
//! ```

mod config;
mod error;
mod loader;
mod schema;

pub use config::ScribeConfig;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
