//! Observability configuration, read from the environment.
//!
//! - `RUST_LOG`: filter directives (default `info`)
//! - `STOREFRONT_LOG_FORMAT`: `json` (default), `pretty`, or `text`

use core::str::FromStr;

use thiserror::Error;

/// Environment variable selecting the log output format.
pub const LOG_FORMAT_ENV: &str = "STOREFRONT_LOG_FORMAT";

/// Environment variable holding filter directives.
pub const LOG_FILTER_ENV: &str = "RUST_LOG";

pub const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown log format `{0}` (expected `json`, `pretty` or `text`)")]
    UnknownLogFormat(String),
}

/// Log line encoding.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    /// Multi-line human-readable output.
    Pretty,
    /// Single-line human-readable output.
    Text,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            "text" | "plain" => Ok(LogFormat::Text),
            _ => Err(ConfigError::UnknownLogFormat(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservabilityConfig {
    pub filter: String,
    pub format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER.to_string(),
            format: LogFormat::default(),
        }
    }
}

impl ObservabilityConfig {
    pub fn from_env() -> (Self, Option<ConfigError>) {
        Self::from_vars(
            std::env::var(LOG_FILTER_ENV).ok(),
            std::env::var(LOG_FORMAT_ENV).ok(),
        )
    }

    /// Build from raw variable values; blank values fall back to defaults.
    ///
    /// An unrecognised format falls back to the default format alone and is
    /// handed back next to the config so the caller can report it.
    pub fn from_vars(filter: Option<String>, format: Option<String>) -> (Self, Option<ConfigError>) {
        let filter = filter
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FILTER.to_string());

        let (format, problem) = match format.as_deref().map(str::trim) {
            None | Some("") => (LogFormat::default(), None),
            Some(raw) => match raw.parse() {
                Ok(format) => (format, None),
                Err(e) => (LogFormat::default(), Some(e)),
            },
        };

        (Self { filter, format }, problem)
    }
}
