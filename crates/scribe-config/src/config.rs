//! Root configuration type.

use serde::{Deserialize, Serialize};

use crate::{ApiSection, AuthKind, AuthSection, ConfigError, DocsSection, LogFormat, LoggingConfig};

/// Complete configuration of a scribe API.
///
/// Use [`ConfigLoader`](crate::ConfigLoader) to load it from files and
/// environment variables.
///
/// # Example
///
/// ```
/// use scribe_config::ScribeConfig;
///
/// let config = ScribeConfig::default();
/// assert_eq!(config.api.docs_url, "/docs");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct ScribeConfig {
    /// API metadata and mount points.
    #[serde(default)]
    pub api: ApiSection,

    /// Documentation routes.
    #[serde(default)]
    pub docs: DocsSection,

    /// Default auth.
    #[serde(default)]
    pub auth: AuthSection,

    /// Logging.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ScribeConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if:
    /// - `api.prefix` or `api.docs_url` is non-empty and does not start with
    ///   `/`, or ends with `/`
    /// - `api.version` is empty
    /// - a server URL is empty
    ///
    /// and `ConfigError::ValidationError` if API key auth has no key name.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_mount("api.prefix", &self.api.prefix)?;
        validate_mount("api.docs_url", &self.api.docs_url)?;

        if self.api.version.trim().is_empty() {
            return Err(ConfigError::invalid_value("api.version", "must not be empty"));
        }

        if let Some(index) = self.api.servers.iter().position(|s| s.url.trim().is_empty()) {
            return Err(ConfigError::invalid_value(
                format!("api.servers[{index}].url"),
                "must not be empty",
            ));
        }

        if self.auth.scheme == AuthKind::ApiKey
            && self.auth.api_key_name.as_deref().map_or(true, str::is_empty)
        {
            return Err(ConfigError::validation_error(
                "auth.api_key_name must be set when auth.scheme is 'api_key'",
            ));
        }

        Ok(())
    }

    /// Development preset: pretty debug logs with source locations.
    ///
    /// ```
    /// use scribe_config::ScribeConfig;
    ///
    /// let config = ScribeConfig::development();
    /// assert_eq!(config.logging.level, "debug");
    /// ```
    #[must_use]
    pub fn development() -> Self {
        let mut config = Self::default();
        config.logging.level = "debug".to_string();
        config.logging.format = LogFormat::Pretty;
        config.logging.include_location = true;
        config
    }

    /// Production preset: JSON logs at info level.
    #[must_use]
    pub fn production() -> Self {
        let mut config = Self::default();
        config.logging.level = "info".to_string();
        config.logging.format = LogFormat::Json;
        config.logging.include_location = false;
        config
    }

    /// Full docs mount point, `prefix + docs_url`.
    #[must_use]
    pub fn docs_path(&self) -> String {
        format!("{}{}", self.api.prefix, self.api.docs_url)
    }
}

fn validate_mount(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Ok(());
    }
    if !value.starts_with('/') {
        return Err(ConfigError::invalid_value(field, "must start with '/'"));
    }
    if value.ends_with('/') {
        return Err(ConfigError::invalid_value(field, "must not end with '/'"));
    }
    Ok(())
}
