//! Error types for route metadata and schema generation.

use thiserror::Error;

/// Errors raised by the metadata layer.
///
/// None of these abort document generation for a whole API: callers omit the
/// affected item and keep going.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The method is not one of GET/POST/PUT/PATCH/DELETE.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// The type-schema adapter could not describe a type.
    #[error("failed to generate schema for {type_name}: {reason}")]
    SchemaGeneration {
        /// Name of the type being described.
        type_name: String,
        /// Why generation failed.
        reason: String,
    },

    /// A generated schema could not be converted to JSON.
    #[error("failed to serialize schema: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for metadata operations.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_method_message() {
        let err = CoreError::UnsupportedMethod("TRACE".to_string());
        assert_eq!(err.to_string(), "unsupported HTTP method: TRACE");
    }

    #[test]
    fn test_schema_generation_message() {
        let err = CoreError::SchemaGeneration {
            type_name: "User".to_string(),
            reason: "recursive alias".to_string(),
        };
        assert!(err.to_string().contains("User"));
        assert!(err.to_string().contains("recursive alias"));
    }

    #[test]
    fn test_from_serde_json() {
        let err: CoreError = serde_json::from_str::<u8>("nope").unwrap_err().into();
        assert!(matches!(err, CoreError::Serialization(_)));
    }
}
