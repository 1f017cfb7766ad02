//! Errors raised while loading or validating a [`ScribeConfig`](crate::ScribeConfig).

use std::path::PathBuf;
use thiserror::Error;

/// Why an API configuration could not be produced.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required config file does not exist.
    #[error("no config file at {path}")]
    FileNotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The config file exists but could not be read.
    #[error("cannot read config file {path}")]
    ReadError {
        /// Path that was read.
        path: PathBuf,
        /// I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Malformed TOML, or a key the schema does not know.
    #[error("invalid TOML config: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Malformed JSON, or a key the schema does not know.
    #[error("invalid JSON config: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A key parsed but its value is unusable, e.g. a prefix without `/`.
    #[error("{field}: {reason}")]
    InvalidValue {
        /// Dotted key, such as `api.docs_url`.
        field: String,
        /// What is wrong with it.
        reason: String,
    },

    /// An override variable could not be parsed.
    #[error("environment override {var}: {reason}")]
    EnvParseError {
        /// Full variable name, prefix included.
        var: String,
        /// What was expected.
        reason: String,
    },

    /// A constraint spanning several keys failed.
    #[error("invalid configuration: {0}")]
    ValidationError(String),
}

impl ConfigError {
    pub(crate) fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    pub(crate) fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadError {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn env_parse_error(var: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::EnvParseError {
            var: var.into(),
            reason: reason.into(),
        }
    }

    /// A cross-key validation failure.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }
}
