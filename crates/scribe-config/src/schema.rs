//! Configuration section types.

use serde::{Deserialize, Serialize};

/// One entry of the document's `servers` list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ServerEntry {
    /// Server URL.
    pub url: String,

    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
}

/// API metadata and mount points.
///
/// # Example
///
/// ```
/// use scribe_config::ApiSection;
///
/// let api = ApiSection {
///     title: "Pet Store".to_string(),
///     prefix: "/v1".to_string(),
///     ..Default::default()
/// };
/// assert_eq!(api.docs_url, "/docs");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ApiSection {
    /// Document title.
    #[serde(default)]
    pub title: String,

    /// Document description. Indentation after line breaks is removed.
    #[serde(default)]
    pub description: String,

    /// API version.
    #[serde(default = "default_version")]
    pub version: String,

    /// Prefix prepended to every route and to the docs mount point.
    #[serde(default)]
    pub prefix: String,

    /// Docs mount point below the prefix.
    #[serde(default = "default_docs_url")]
    pub docs_url: String,

    /// Servers listed in the document.
    #[serde(default)]
    pub servers: Vec<ServerEntry>,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            version: default_version(),
            prefix: String::new(),
            docs_url: default_docs_url(),
            servers: Vec::new(),
        }
    }
}

fn default_version() -> String {
    "1.0.0".to_string()
}

fn default_docs_url() -> String {
    "/docs".to_string()
}

/// Swagger UI expansion level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DocExpansionSetting {
    /// Everything collapsed.
    None,
    /// Operation list only.
    #[default]
    List,
    /// Everything expanded.
    Full,
}

/// Documentation routes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DocsSection {
    /// Mount the docs page and document routes.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Page title; defaults to the API title.
    #[serde(default)]
    pub page_title: Option<String>,

    /// Swagger UI version loaded from the CDN.
    #[serde(default = "default_swagger_version")]
    pub swagger_version: String,

    /// Initial expansion of the operation list.
    #[serde(default)]
    pub doc_expansion: DocExpansionSetting,
}

impl Default for DocsSection {
    fn default() -> Self {
        Self {
            enabled: true,
            page_title: None,
            swagger_version: default_swagger_version(),
            doc_expansion: DocExpansionSetting::default(),
        }
    }
}

fn default_swagger_version() -> String {
    "5.18.2".to_string()
}

/// Default auth scheme kind.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AuthKind {
    /// No default auth.
    #[default]
    None,
    /// HTTP bearer.
    Bearer,
    /// HTTP basic.
    Basic,
    /// API key.
    ApiKey,
}

/// Where an API key is sent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyIn {
    /// Request header.
    #[default]
    Header,
    /// Query string.
    Query,
    /// Cookie.
    Cookie,
}

/// Default auth applied to routes that do not set their own.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct AuthSection {
    /// Scheme kind.
    #[serde(default)]
    pub scheme: AuthKind,

    /// Name under `components.securitySchemes`; defaults per kind.
    #[serde(default)]
    pub name: Option<String>,

    /// `bearerFormat` for bearer auth.
    #[serde(default)]
    pub bearer_format: Option<String>,

    /// Key name for API key auth.
    #[serde(default)]
    pub api_key_name: Option<String>,

    /// Key location for API key auth.
    #[serde(default)]
    pub api_key_in: ApiKeyIn,
}

/// Log format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON formatted logs (production).
    #[default]
    Json,
    /// Human-readable pretty format (development).
    Pretty,
    /// One line per event.
    Compact,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Enable logging.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Filter directive (trace, debug, info, warn, error, or per-target).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Include source file and line in logs.
    #[serde(default)]
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::default(),
            include_location: false,
        }
    }
}

impl LoggingConfig {
    /// The equivalent subscriber settings.
    #[must_use]
    pub fn to_log_config(&self) -> scribe_telemetry::LogConfig {
        let output = match self.format {
            LogFormat::Json => scribe_telemetry::LogOutput::Json,
            LogFormat::Pretty => scribe_telemetry::LogOutput::Pretty,
            LogFormat::Compact => scribe_telemetry::LogOutput::Compact,
        };
        scribe_telemetry::LogConfig {
            enabled: self.enabled,
            filter: self.level.clone(),
            output,
            source_location: self.include_location,
            span_events: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_defaults() {
        let api = ApiSection::default();
        assert_eq!(api.version, "1.0.0");
        assert_eq!(api.docs_url, "/docs");
        assert!(api.prefix.is_empty());
    }

    #[test]
    fn test_docs_defaults() {
        let docs = DocsSection::default();
        assert!(docs.enabled);
        assert_eq!(docs.doc_expansion, DocExpansionSetting::List);
    }

    #[test]
    fn test_auth_kind_serialization() {
        let section: AuthSection = toml::from_str(r#"scheme = "api_key""#).unwrap();
        assert_eq!(section.scheme, AuthKind::ApiKey);
        assert_eq!(section.api_key_in, ApiKeyIn::Header);
    }

    #[test]
    fn test_log_config_conversion() {
        let logging = LoggingConfig {
            format: LogFormat::Pretty,
            include_location: true,
            ..Default::default()
        };
        let log = logging.to_log_config();
        assert_eq!(log.output, scribe_telemetry::LogOutput::Pretty);
        assert!(log.source_location);
        assert_eq!(log.filter, "info");
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<ApiSection, _> = toml::from_str(r#"titel = "typo""#);
        assert!(result.is_err());
    }
}
