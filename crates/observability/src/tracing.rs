//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

use crate::config::{DEFAULT_FILTER, LogFormat, ObservabilityConfig};

/// Install the global subscriber described by `config`.
///
/// Safe to call multiple times (subsequent calls are no-ops). An invalid
/// filter falls back to [`DEFAULT_FILTER`] and is reported once the
/// subscriber is up.
pub fn init_with(config: &ObservabilityConfig) {
    let (filter, rejected) = match EnvFilter::try_new(&config.filter) {
        Ok(filter) => (filter, None),
        Err(err) => (EnvFilter::new(DEFAULT_FILTER), Some(err)),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false);

    // Each format yields a distinct subscriber type.
    let installed = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    }
    .is_ok();

    if let Some(err) = rejected {
        ::tracing::warn!(filter = %config.filter, error = %err, "invalid log filter, using default");
    }
    if installed {
        ::tracing::debug!(format = ?config.format, "tracing initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_is_a_no_op() {
        let config = ObservabilityConfig {
            filter: "not a [valid filter".to_string(),
            format: LogFormat::Compact,
        };
        init_with(&config);
        init_with(&ObservabilityConfig::default());
        ::tracing::info!("still logging");
    }
}
