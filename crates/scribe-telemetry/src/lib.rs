//! Logging setup for scribe services.
//!
//! scribe's library crates log through `tracing`: route registration and
//! router merges at `debug`, document compilation with counts at `debug`,
//! omitted fields at `warn`, failed documentation requests at `error`.
//! This crate installs the subscriber that writes those events out.

mod error;
pub mod logging;

pub use error::TelemetryError;
pub use logging::{create_env_filter, init_logging, LogConfig, LogOutput};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
