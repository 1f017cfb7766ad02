//! Structured logging.
//!
//! Installs a `tracing-subscriber` fmt layer behind an [`EnvFilter`]. Library
//! crates only emit events through `tracing`; the application decides once,
//! at startup, where they go.
//!
//! # Example
//!
//! ```rust,no_run
//! use scribe_telemetry::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::development()).unwrap();
//! tracing::info!(path = "/docs", "documentation mounted");
//! ```

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::error::TelemetryError;
use crate::TelemetryResult;

/// Event encoding written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogOutput {
    /// One JSON object per line.
    #[default]
    Json,
    /// Multi-line, coloured.
    Pretty,
    /// Single line per event.
    Compact,
}

/// Subscriber settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// When false, [`init_logging`] installs nothing.
    pub enabled: bool,

    /// Filter directive, e.g. `info` or `scribe_docs=debug,warn`.
    pub filter: String,

    /// Encoding of each event.
    pub output: LogOutput,

    /// Record file and line of each event.
    pub source_location: bool,

    /// Emit an event when a span opens and closes.
    pub span_events: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::production()
    }
}

impl LogConfig {
    /// Pretty output at debug level with source locations.
    #[must_use]
    pub fn development() -> Self {
        Self {
            enabled: true,
            filter: "debug".to_string(),
            output: LogOutput::Pretty,
            source_location: true,
            span_events: true,
        }
    }

    /// JSON output at info level.
    #[must_use]
    pub fn production() -> Self {
        Self {
            enabled: true,
            filter: "info".to_string(),
            output: LogOutput::Json,
            source_location: false,
            span_events: false,
        }
    }

    fn fmt_span(&self) -> FmtSpan {
        if self.span_events {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }
}

/// Installs the global subscriber described by `config`.
///
/// # Errors
///
/// `InvalidConfig` if the filter directive does not parse, `LoggingInit` if
/// a global subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> TelemetryResult<()> {
    if !config.enabled {
        return Ok(());
    }

    let filter = create_env_filter(&config.filter)?;
    let base = tracing_subscriber::fmt::layer()
        .with_span_events(config.fmt_span())
        .with_file(config.source_location)
        .with_line_number(config.source_location);

    let layer: Box<dyn Layer<Registry> + Send + Sync> = match config.output {
        LogOutput::Json => base.json().with_filter(filter).boxed(),
        LogOutput::Pretty => base.pretty().with_filter(filter).boxed(),
        LogOutput::Compact => base.compact().with_filter(filter).boxed(),
    };

    tracing_subscriber::registry()
        .with(layer)
        .try_init()
        .map_err(|e| TelemetryError::LoggingInit(e.to_string()))
}

/// Parses a filter directive.
///
/// # Errors
///
/// `InvalidConfig` naming the directive.
pub fn create_env_filter(directive: &str) -> TelemetryResult<EnvFilter> {
    EnvFilter::try_new(directive).map_err(|e| {
        TelemetryError::InvalidConfig(format!("invalid log filter '{directive}': {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert_eq!(LogConfig::default(), LogConfig::production());

        let dev = LogConfig::development();
        assert_eq!(dev.output, LogOutput::Pretty);
        assert!(dev.source_location);
        assert_eq!(dev.fmt_span(), FmtSpan::NEW | FmtSpan::CLOSE);

        let prod = LogConfig::production();
        assert_eq!(prod.output, LogOutput::Json);
        assert_eq!(prod.filter, "info");
        assert_eq!(prod.fmt_span(), FmtSpan::NONE);
    }

    #[test]
    fn test_filter_directives() {
        assert!(create_env_filter("warn").is_ok());
        assert!(create_env_filter("scribe_docs=debug,warn").is_ok());

        let err = create_env_filter("scribe=loud").unwrap_err();
        assert!(matches!(err, TelemetryError::InvalidConfig(ref m) if m.contains("scribe=loud")));
    }

    #[test]
    fn test_disabled_skips_filter_parsing() {
        let config = LogConfig {
            enabled: false,
            filter: "scribe=loud".to_string(),
            ..LogConfig::default()
        };
        assert!(init_logging(&config).is_ok());
    }
}
