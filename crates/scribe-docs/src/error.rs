//! Error types for document compilation.

use scribe_core::CoreError;
use thiserror::Error;

/// Errors that can occur while compiling or serving documentation.
#[derive(Debug, Error)]
pub enum DocsError {
    /// Failed to serialize the document to JSON.
    #[error("failed to serialize OpenAPI document: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The type-schema adapter failed for the whole batch.
    #[error("schema generation failed: {0}")]
    SchemaGeneration(#[from] CoreError),
}

/// Result type for documentation operations.
pub type DocsResult<T> = Result<T, DocsError>;
