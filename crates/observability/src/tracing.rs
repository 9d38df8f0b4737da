//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

use crate::config::{ConfigError, LogFormat, ObservabilityConfig};

/// Install the global subscriber described by `config`.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init(config: &ObservabilityConfig) {
    let filter = EnvFilter::new(&config.filter);

    let _ = match config.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .with_timer(tracing_subscriber::fmt::time::SystemTime)
            .with_target(false)
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .pretty()
            .try_init(),
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init(),
    };
}

/// Log a configuration problem that was replaced by a fallback.
pub fn report_fallback(config: &ObservabilityConfig, problem: &ConfigError) {
    ::tracing::warn!(
        error = %problem,
        filter = %config.filter,
        format = ?config.format,
        "log configuration fell back to defaults"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn init_is_idempotent() {
        let config = ObservabilityConfig::default();
        init(&config);
        init(&config);
        init(&ObservabilityConfig { format: LogFormat::Pretty, ..config });
        crate::init();
    }

    #[test]
    fn fallback_is_reported_as_warning() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let (config, problem) = ObservabilityConfig::from_vars(
            Some("storefront_products=debug".to_string()),
            Some("xml".to_string()),
        );
        let problem = problem.unwrap();
        ::tracing::subscriber::with_default(subscriber, || report_fallback(&config, &problem));

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("WARN"), "{output}");
        assert!(output.contains("unknown log format `xml`"), "{output}");
        assert!(output.contains("filter=storefront_products=debug"), "{output}");
        assert!(output.contains("format=Json"), "{output}");
    }
}
