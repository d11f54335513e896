//! Detection configuration.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::anomaly::EngagementKind;
use crate::error::{ConfigError, ConfigResult};

/// Per-engagement-kind multipliers used to build the weighted engagement scalar.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngagementWeights {
    pub fires: f64,
    pub shares: f64,
    pub tips: f64,
    pub comments: f64,
}

impl EngagementWeights {
    /// Weight for a single engagement kind.
    pub fn get(&self, kind: EngagementKind) -> f64 {
        match kind {
            EngagementKind::Fires => self.fires,
            EngagementKind::Shares => self.shares,
            EngagementKind::Tips => self.tips,
            EngagementKind::Comments => self.comments,
        }
    }

    fn validate(&self) -> ConfigResult<()> {
        for kind in EngagementKind::ALL {
            let w = self.get(kind);
            if !w.is_finite() || w < 0.0 {
                return Err(ConfigError::OutOfRange {
                    field: kind.weight_field(),
                    value: w,
                    reason: "must be finite and >= 0",
                });
            }
        }
        Ok(())
    }
}

impl Default for EngagementWeights {
    fn default() -> Self {
        Self {
            fires: 1.0,
            shares: 3.0,
            tips: 5.0,
            comments: 1.0,
        }
    }
}

/// Immutable detection parameters supplied at engine construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    /// Minimum momentum / predictive-score ratio for an item to count as an anomaly.
    pub anomaly_threshold: f64,
    /// Floor on weighted engagement (filters noise).
    pub min_engagement: f64,
    /// Maximum number of anomalies returned per detection call.
    pub batch_size: usize,
    /// Exponent applied to `(age_hours + 2)` in the momentum denominator.
    pub gravity: f64,
    pub weights: EngagementWeights,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            anomaly_threshold: 1.5,
            min_engagement: 10.0,
            batch_size: 50,
            gravity: 1.8,
            weights: EngagementWeights::default(),
        }
    }
}

impl EvolutionConfig {
    pub fn with_anomaly_threshold(mut self, threshold: f64) -> Self {
        self.anomaly_threshold = threshold;
        self
    }

    pub fn with_min_engagement(mut self, min: f64) -> Self {
        self.min_engagement = min;
        self
    }

    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }

    pub fn with_gravity(mut self, gravity: f64) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_weights(mut self, weights: EngagementWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Reject values that would make the momentum formula meaningless.
    pub fn validate(&self) -> ConfigResult<()> {
        non_negative("anomaly_threshold", self.anomaly_threshold)?;
        non_negative("min_engagement", self.min_engagement)?;
        non_negative("gravity", self.gravity)?;
        if self.batch_size == 0 {
            return Err(ConfigError::EmptyBatch);
        }
        self.weights.validate()
    }
}

fn non_negative(field: &'static str, value: f64) -> ConfigResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            reason: "must be finite and >= 0",
        })
    }
}

/// Look-back window for candidate retrieval (`created_at` within the last N days).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionWindow {
    pub days: u32,
}

impl DetectionWindow {
    pub fn last_days(days: u32) -> Self {
        Self { days }
    }

    /// Earliest creation time (exclusive) admitted by the window.
    pub fn start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::days(i64::from(self.days))
    }

    pub fn contains(&self, created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        created_at > self.start(now)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.days == 0 {
            Err(ConfigError::EmptyWindow)
        } else {
            Ok(())
        }
    }
}

impl Default for DetectionWindow {
    fn default() -> Self {
        Self { days: 30 }
    }
}
