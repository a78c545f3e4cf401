use thiserror::Error;

/// An indicator was configured with parameters it cannot run with.
///
/// Raised while building a calculator, never while computing one. The engine
/// keeps it as the status of the offending key and carries on with the rest.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{indicator}: {param} must be greater than 0, got {value}")]
    NonPositivePeriod {
        indicator: &'static str,
        param: &'static str,
        value: i64,
    },

    #[error("{indicator}: std-dev multiplier must be a finite, non-negative number, got {value}")]
    InvalidMultiplier { indicator: &'static str, value: f64 },
}

impl ConfigError {
    pub(crate) fn non_positive(indicator: &'static str, param: &'static str, value: i64) -> Self {
        ConfigError::NonPositivePeriod {
            indicator,
            param,
            value,
        }
    }
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("Settings format error: {source}")]
    SettingsFormat {
        #[from]
        source: serde_json::Error,
    },

    #[error("Background computation failed: {0}")]
    Worker(String),
}

/// Periods arrive as signed integers from settings; anything below 1 is rejected.
pub(crate) fn require_period(
    indicator: &'static str,
    param: &'static str,
    value: i64,
) -> Result<usize, ConfigError> {
    if value <= 0 {
        return Err(ConfigError::non_positive(indicator, param, value));
    }
    usize::try_from(value).map_err(|_| ConfigError::non_positive(indicator, param, value))
}
