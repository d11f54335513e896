use thiserror::Error;

/// Errors raised when a configuration value is outside its valid range.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for {field}: {value} ({reason})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("batch size must be at least 1")]
    EmptyBatch,

    #[error("detection window must span at least one day")]
    EmptyWindow,
}

/// Convenience alias for configuration validation results.
pub type ConfigResult<T> = Result<T, ConfigError>;
