//! Building a [`ScribeConfig`] from defaults, a file and the environment.

use std::env;
use std::fs;
use std::path::Path;

use crate::{ApiKeyIn, AuthKind, ConfigError, DocExpansionSetting, LogFormat, ScribeConfig, ServerEntry};

/// Layers API configuration sources.
///
/// A file replaces the starting preset wholesale (keys it omits fall back to
/// their defaults). `PREFIX__SECTION__KEY` environment variables are applied
/// last, at [`load`](Self::load), and validation runs after them.
///
/// # Example
///
/// ```no_run
/// use scribe_config::ConfigLoader;
///
/// # fn main() -> Result<(), scribe_config::ConfigError> {
/// let config = ConfigLoader::new()
///     .with_optional_file("scribe.toml")?
///     .with_env_prefix("SCRIBE")
///     .load()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConfigLoader {
    config: ScribeConfig,
    env_prefix: Option<String>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Starts from [`ScribeConfig::default`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: ScribeConfig::default(),
            env_prefix: None,
        }
    }

    /// Starts from the development preset (pretty debug logs).
    ///
    /// ```
    /// use scribe_config::ConfigLoader;
    ///
    /// let config = ConfigLoader::new().with_development().load().unwrap();
    /// assert_eq!(config.logging.level, "debug");
    /// ```
    #[must_use]
    pub fn with_development(mut self) -> Self {
        self.config = ScribeConfig::development();
        self
    }

    /// Starts from the production preset.
    #[must_use]
    pub fn with_production(mut self) -> Self {
        self.config = ScribeConfig::production();
        self
    }

    /// Reads a `.toml` or `.json` file.
    ///
    /// # Errors
    ///
    /// `FileNotFound`, `ReadError`, or a parse error (unknown keys included).
    ///
    /// # Example
    ///
    /// ```
    /// use std::io::Write;
    /// use scribe_config::ConfigLoader;
    ///
    /// let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    /// writeln!(file, "[api]\ntitle = \"Pets\"\nprefix = \"/api\"").unwrap();
    ///
    /// let config = ConfigLoader::new().with_file(file.path()).unwrap().load().unwrap();
    /// assert_eq!(config.api.title, "Pets");
    /// assert_eq!(config.api.prefix, "/api");
    /// ```
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::file_not_found(path),
            _ => ConfigError::read_error(path, e),
        })?;
        self.config = Self::parse_file(&content, path)?;
        Ok(self)
    }

    /// Like [`with_file`](Self::with_file), but a missing file is skipped.
    ///
    /// # Errors
    ///
    /// As `with_file`, once the file exists.
    pub fn with_optional_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            self.with_file(path)
        } else {
            Ok(self)
        }
    }

    /// Parses inline `toml` or `json` text.
    ///
    /// # Example
    ///
    /// ```
    /// use scribe_config::ConfigLoader;
    ///
    /// let toml = r#"
    ///     [api]
    ///     prefix = "/prefix"
    ///     docs_url = "/ui"
    /// "#;
    ///
    /// let config = ConfigLoader::new()
    ///     .with_string(toml, "toml")
    ///     .unwrap()
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(config.docs_path(), "/prefix/ui");
    /// ```
    pub fn with_string(mut self, content: &str, format: &str) -> Result<Self, ConfigError> {
        self.config = match format.to_lowercase().as_str() {
            "toml" => toml::from_str(content)?,
            "json" => serde_json::from_str(content)?,
            _ => {
                return Err(ConfigError::invalid_value(
                    "format",
                    format!("expected 'toml' or 'json', got '{format}'"),
                ))
            }
        };
        Ok(self)
    }

    /// Enables environment overrides under `prefix`.
    ///
    /// Variables use the format `PREFIX__SECTION__KEY`, for example
    /// `SCRIBE__API__PREFIX=/v2` or `SCRIBE__LOGGING__LEVEL=debug`.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_uppercase());
        self
    }

    /// Exports variables from a `.env` file in the working directory, if
    /// present, so they are seen by the overrides.
    pub fn with_dotenv(self) -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if e.not_found() => Ok(self),
            Err(e) => Err(ConfigError::validation_error(format!("failed to load .env: {e}"))),
        }
    }

    /// Applies overrides and validates.
    ///
    /// # Errors
    ///
    /// `EnvParseError` for a malformed variable, otherwise whatever
    /// [`ScribeConfig::validate`] reports.
    ///
    /// # Example
    ///
    /// ```
    /// use scribe_config::ConfigLoader;
    ///
    /// std::env::set_var("SCRIBE_LOAD_DEMO__API__TITLE", "From env");
    /// std::env::set_var("SCRIBE_LOAD_DEMO__DOCS__ENABLED", "off");
    ///
    /// let config = ConfigLoader::new()
    ///     .with_env_prefix("scribe_load_demo")
    ///     .load()
    ///     .unwrap();
    /// assert_eq!(config.api.title, "From env");
    /// assert!(!config.docs.enabled);
    /// ```
    pub fn load(mut self) -> Result<ScribeConfig, ConfigError> {
        if let Some(prefix) = self.env_prefix.take() {
            self.apply_env_overrides(&prefix)?;
        }

        self.config.validate()?;
        Ok(self.config)
    }

    /// The current layers as-is: no overrides, no validation.
    #[must_use]
    pub fn load_unvalidated(self) -> ScribeConfig {
        self.config
    }

    fn parse_file(content: &str, path: &Path) -> Result<ScribeConfig, ConfigError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match extension.as_deref() {
            Some("toml") => Ok(toml::from_str(content)?),
            Some("json") => Ok(serde_json::from_str(content)?),
            _ => Err(ConfigError::validation_error(format!(
                "unsupported configuration file format: {}",
                path.display()
            ))),
        }
    }

    fn apply_env_overrides(&mut self, prefix: &str) -> Result<(), ConfigError> {
        let mut vars: Vec<(String, String)> = env::vars()
            .filter(|(k, _)| k.starts_with(prefix))
            .collect();
        vars.sort();

        for (key, value) in vars {
            self.apply_env_var(&key, &value, prefix)?;
        }

        Ok(())
    }

    fn apply_env_var(&mut self, key: &str, value: &str, prefix: &str) -> Result<(), ConfigError> {
        let Some(rest) = key.strip_prefix(prefix).and_then(|k| k.strip_prefix("__")) else {
            return Ok(());
        };

        let parts: Vec<&str> = rest.split("__").collect();
        let config = &mut self.config;

        match parts.as_slice() {
            ["API", "TITLE"] => config.api.title = value.to_string(),
            ["API", "DESCRIPTION"] => config.api.description = value.to_string(),
            ["API", "VERSION"] => config.api.version = value.to_string(),
            ["API", "PREFIX"] => config.api.prefix = value.to_string(),
            ["API", "DOCS_URL"] => config.api.docs_url = value.to_string(),
            ["API", "SERVERS"] => {
                config.api.servers = value
                    .split(',')
                    .map(str::trim)
                    .filter(|url| !url.is_empty())
                    .map(|url| ServerEntry {
                        url: url.to_string(),
                        description: None,
                    })
                    .collect();
            }

            ["DOCS", "ENABLED"] => {
                config.docs.enabled = parse_bool(value)
                    .ok_or_else(|| ConfigError::env_parse_error(key, "expected boolean"))?;
            }
            ["DOCS", "PAGE_TITLE"] => config.docs.page_title = non_empty(value),
            ["DOCS", "SWAGGER_VERSION"] => config.docs.swagger_version = value.to_string(),
            ["DOCS", "DOC_EXPANSION"] => {
                config.docs.doc_expansion = match value.to_lowercase().as_str() {
                    "none" => DocExpansionSetting::None,
                    "list" => DocExpansionSetting::List,
                    "full" => DocExpansionSetting::Full,
                    _ => {
                        return Err(ConfigError::env_parse_error(
                            key,
                            "expected 'none', 'list', or 'full'",
                        ))
                    }
                };
            }

            ["AUTH", "SCHEME"] => {
                config.auth.scheme = match value.to_lowercase().as_str() {
                    "none" => AuthKind::None,
                    "bearer" => AuthKind::Bearer,
                    "basic" => AuthKind::Basic,
                    "api_key" => AuthKind::ApiKey,
                    _ => {
                        return Err(ConfigError::env_parse_error(
                            key,
                            "expected 'none', 'bearer', 'basic', or 'api_key'",
                        ))
                    }
                };
            }
            ["AUTH", "NAME"] => config.auth.name = non_empty(value),
            ["AUTH", "BEARER_FORMAT"] => config.auth.bearer_format = non_empty(value),
            ["AUTH", "API_KEY_NAME"] => config.auth.api_key_name = non_empty(value),
            ["AUTH", "API_KEY_IN"] => {
                config.auth.api_key_in = match value.to_lowercase().as_str() {
                    "header" => ApiKeyIn::Header,
                    "query" => ApiKeyIn::Query,
                    "cookie" => ApiKeyIn::Cookie,
                    _ => {
                        return Err(ConfigError::env_parse_error(
                            key,
                            "expected 'header', 'query', or 'cookie'",
                        ))
                    }
                };
            }

            ["LOGGING", "ENABLED"] => {
                config.logging.enabled = parse_bool(value)
                    .ok_or_else(|| ConfigError::env_parse_error(key, "expected boolean"))?;
            }
            ["LOGGING", "LEVEL"] => config.logging.level = value.to_string(),
            ["LOGGING", "FORMAT"] => {
                config.logging.format = match value.to_lowercase().as_str() {
                    "json" => LogFormat::Json,
                    "pretty" => LogFormat::Pretty,
                    "compact" => LogFormat::Compact,
                    _ => {
                        return Err(ConfigError::env_parse_error(
                            key,
                            "expected 'json', 'pretty' or 'compact'",
                        ))
                    }
                };
            }
            ["LOGGING", "INCLUDE_LOCATION"] => {
                config.logging.include_location = parse_bool(value)
                    .ok_or_else(|| ConfigError::env_parse_error(key, "expected boolean"))?;
            }

            _ => {}
        }

        Ok(())
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// Parse a boolean from a string.
fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
