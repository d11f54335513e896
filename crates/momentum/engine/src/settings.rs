//! Layered engine settings: defaults, then an optional file, then `MOMENTUM_*`
//! environment variables.
//!
//! Nested keys use a double underscore in the environment, e.g.
//! `MOMENTUM_EVOLUTION__ANOMALY_THRESHOLD=2.0` or `MOMENTUM_STORE__TYPE=postgres`.

use chrono::FixedOffset;
use momentum_detector::DEFAULT_EVERGREEN_MIN_AGE_HOURS;
use momentum_types::{ConfidencePolicy, DetectionWindow, EvolutionConfig};
use serde::{Deserialize, Serialize};

use crate::error::{EvolutionError, EvolutionResult};

/// Top-level engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSettings {
    #[serde(default)]
    pub evolution: EvolutionConfig,

    #[serde(default)]
    pub window: DetectionWindow,

    #[serde(default = "default_evergreen_min_age_hours")]
    pub evergreen_min_age_hours: f64,

    /// Offset from UTC, in minutes, used to bucket posting hours.
    #[serde(default)]
    pub posting_offset_minutes: i32,

    #[serde(default)]
    pub policy: ConfidencePolicy,

    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            evolution: EvolutionConfig::default(),
            window: DetectionWindow::default(),
            evergreen_min_age_hours: default_evergreen_min_age_hours(),
            posting_offset_minutes: 0,
            policy: ConfidencePolicy::default(),
            store: StoreSettings::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl EngineSettings {
    /// Load settings from defaults, an optional file and the environment, then validate.
    pub fn load(path: Option<&str>) -> EvolutionResult<Self> {
        let mut builder = config::Config::builder();

        builder = builder.add_source(config::Config::try_from(&EngineSettings::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("MOMENTUM")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings: Self = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> EvolutionResult<()> {
        self.evolution.validate()?;
        self.window.validate()?;
        self.policy.validate()?;
        if !self.evergreen_min_age_hours.is_finite() || self.evergreen_min_age_hours < 0.0 {
            return Err(EvolutionError::Config(format!(
                "evergreen_min_age_hours must be finite and >= 0, got {}",
                self.evergreen_min_age_hours
            )));
        }
        self.posting_offset()?;
        Ok(())
    }

    pub fn posting_offset(&self) -> EvolutionResult<FixedOffset> {
        self.posting_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                EvolutionError::Config(format!(
                    "posting_offset_minutes out of range: {}",
                    self.posting_offset_minutes
                ))
            })
    }
}

fn default_evergreen_min_age_hours() -> f64 {
    DEFAULT_EVERGREEN_MIN_AGE_HOURS
}

/// Candidate repository backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StoreSettings {
    /// Process-local store; starts empty.
    #[default]
    Memory,

    /// PostgreSQL (requires the `postgres` feature).
    Postgres {
        url: String,
        #[serde(default = "default_max_connections")]
        max_connections: u32,
        #[serde(default = "default_connect_timeout_secs")]
        connect_timeout_secs: u64,
    },
}

fn default_max_connections() -> u32 {
    10
}

fn default_connect_timeout_secs() -> u64 {
    5
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
