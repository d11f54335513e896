use momentum_store::StoreError;
use momentum_types::ConfigError;

/// Errors surfaced by the evolution engine.
///
/// Zero anomalies is not an error; it yields the empty report.
#[derive(Debug, thiserror::Error)]
pub enum EvolutionError {
    #[error("data source error: {0}")]
    DataSource(#[from] StoreError),

    #[error("configuration error: {0}")]
    Config(String),
}

impl From<ConfigError> for EvolutionError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}

impl From<config::ConfigError> for EvolutionError {
    fn from(e: config::ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}

/// Result type for engine operations.
pub type EvolutionResult<T> = Result<T, EvolutionError>;
