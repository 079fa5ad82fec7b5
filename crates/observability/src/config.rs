use std::env;

/// Environment variable selecting the log output format.
pub const LOG_FORMAT_ENV: &str = "MODELBASE_LOG_FORMAT";

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
    Compact,
}

impl LogFormat {
    /// Unknown values fall back to JSON.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pretty" => Self::Pretty,
            "compact" => Self::Compact,
            _ => Self::Json,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// `EnvFilter` directive string, e.g. `info,modelbase_core=debug`.
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
    pub fn from_env() -> Self {
        Self::from_vars(
            env::var("RUST_LOG").ok().as_deref(),
            env::var(LOG_FORMAT_ENV).ok().as_deref(),
        )
    }

    fn from_vars(filter: Option<&str>, format: Option<&str>) -> Self {
        Self {
            filter: filter
                .filter(|f| !f.trim().is_empty())
                .unwrap_or(DEFAULT_FILTER)
                .to_string(),
            format: format.map(LogFormat::parse).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_info_json() {
        assert_eq!(
            ObservabilityConfig::from_vars(None, None),
            ObservabilityConfig::default()
        );
        assert_eq!(
            ObservabilityConfig::from_vars(Some("  "), None).filter,
            DEFAULT_FILTER
        );
    }

    #[test]
    fn reads_filter_and_format() {
        let cfg = ObservabilityConfig::from_vars(Some("modelbase_core=debug"), Some("Pretty"));
        assert_eq!(cfg.filter, "modelbase_core=debug");
        assert_eq!(cfg.format, LogFormat::Pretty);
    }

    #[test]
    fn unknown_format_falls_back_to_json() {
        assert_eq!(LogFormat::parse("xml"), LogFormat::Json);
        assert_eq!(LogFormat::parse("compact"), LogFormat::Compact);
    }
}
