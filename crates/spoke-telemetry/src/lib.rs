//! Logging initialization for applications embedding the hub client.
//!
//! Library crates only emit `tracing` events; wiring them to an output is
//! the application's call. This crate provides that wiring once, at
//! startup.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Configuration for the logging subsystem.
#[derive(Clone, Debug)]
pub struct TelemetryConfig {
    /// Default log level. Overridden by the RUST_LOG env var.
    pub log_level: Level,
    /// Per-module level overrides (e.g. "spoke_client" => DEBUG).
    pub module_levels: Vec<(String, Level)>,
    /// Emit JSON lines instead of human-readable output.
    pub json_output: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: Level::INFO,
            module_levels: Vec::new(),
            json_output: false,
        }
    }
}

/// Returned by [`init_telemetry`]; reports the filter directives applied
/// when RUST_LOG is unset.
pub struct TelemetryGuard {
    directives: String,
}

impl TelemetryGuard {
    pub fn directives(&self) -> &str {
        &self.directives
    }
}

/// Build the env-filter directive string for a config
/// (e.g. `"info,spoke_client=debug"`).
pub fn filter_directives(config: &TelemetryConfig) -> String {
    let mut directives = config.log_level.to_string().to_lowercase();
    for (module, level) in &config.module_levels {
        directives.push_str(&format!(",{}={}", module, level.to_string().to_lowercase()));
    }
    directives
}

/// Initialize the tracing subscriber. Call once at startup.
pub fn init_telemetry(config: TelemetryConfig) -> TelemetryGuard {
    let directives = filter_directives(&config);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&directives));

    if config.json_output {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_span_list(true)
            .with_filter(env_filter);
        tracing_subscriber::registry().with(fmt_layer).init();
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_filter(env_filter);
        tracing_subscriber::registry().with(fmt_layer).init();
    }

    TelemetryGuard { directives }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_info_text() {
        let config = TelemetryConfig::default();
        assert_eq!(config.log_level, Level::INFO);
        assert!(config.module_levels.is_empty());
        assert!(!config.json_output);
    }

    #[test]
    fn directives_include_module_overrides() {
        let config = TelemetryConfig {
            log_level: Level::WARN,
            module_levels: vec![
                ("spoke_client".to_string(), Level::DEBUG),
                ("spoke_core".to_string(), Level::TRACE),
            ],
            json_output: false,
        };
        assert_eq!(
            filter_directives(&config),
            "warn,spoke_client=debug,spoke_core=trace"
        );
    }

    #[test]
    fn directives_without_overrides_is_bare_level() {
        let config = TelemetryConfig::default();
        assert_eq!(filter_directives(&config), "info");
    }
}
