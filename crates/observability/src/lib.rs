//! Tracing/logging setup shared by the storefront crates.

/// Initialize process-wide tracing from the environment.
///
/// A bad `STOREFRONT_LOG_FORMAT` only resets the format; the filter from
/// `RUST_LOG` is kept and the problem is logged once the subscriber is up.
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    let (config, problem) = config::ObservabilityConfig::from_env();
    tracing::init(&config);
    if let Some(problem) = problem {
        tracing::report_fallback(&config, &problem);
    }
}

/// Environment-driven configuration.
pub mod config;

/// Tracing subscriber installation.
pub mod tracing;

pub use config::{ConfigError, LogFormat, ObservabilityConfig};
