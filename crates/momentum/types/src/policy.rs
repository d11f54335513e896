//! Versioned confidence calibration for recommendation synthesis.
//!
//! The constants here were hand-tuned; keeping them in one serializable object
//! lets them be recalibrated from observed outcomes without touching the
//! pipeline shape.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidencePolicy {
    pub version: String,

    /// Distinct anomalies an emerging term must appear in.
    pub vocabulary_min_anomalies: usize,
    pub vocabulary_base: f64,
    pub vocabulary_slope: f64,
    pub vocabulary_cap: f64,

    /// Fraction of anomalies a top hashtag must appear in.
    pub hashtag_min_share: f64,
    pub hashtag_base: f64,
    pub hashtag_slope: f64,
    pub hashtag_cap: f64,

    pub region_min_share: f64,
    pub region_confidence: f64,
    /// Culture bonus proposed for a boosted region.
    pub region_bonus: f64,

    /// Shares / total engagement ratio above which a weight change is proposed.
    pub share_ratio_trigger: f64,
    pub weight_confidence: f64,

    pub enthusiasm_confidence: f64,
    pub conversational_confidence: f64,

    /// Minimum confidence for a vocabulary term to reach the policy summary.
    pub vocabulary_report_threshold: f64,
    /// Minimum confidence for a weight change to reach the policy summary.
    pub weight_report_threshold: f64,

    pub max_evidence: usize,
}

impl Default for ConfidencePolicy {
    fn default() -> Self {
        Self {
            version: "1".into(),
            vocabulary_min_anomalies: 3,
            vocabulary_base: 0.3,
            vocabulary_slope: 0.1,
            vocabulary_cap: 0.9,
            hashtag_min_share: 0.3,
            hashtag_base: 0.4,
            hashtag_slope: 0.5,
            hashtag_cap: 0.85,
            region_min_share: 0.2,
            region_confidence: 0.7,
            region_bonus: 2.0,
            share_ratio_trigger: 0.3,
            weight_confidence: 0.6,
            enthusiasm_confidence: 0.75,
            conversational_confidence: 0.70,
            vocabulary_report_threshold: 0.6,
            weight_report_threshold: 0.5,
            max_evidence: 3,
        }
    }
}

impl ConfidencePolicy {
    /// `min(cap, base + frequency·slope)`, where frequency is occurrences / |anomalies|.
    pub fn vocabulary_confidence(&self, frequency: f64) -> f64 {
        (self.vocabulary_base + frequency * self.vocabulary_slope).min(self.vocabulary_cap)
    }

    /// `min(cap, base + share·slope)`, where share is count / |anomalies|.
    pub fn hashtag_confidence(&self, share: f64) -> f64 {
        (self.hashtag_base + share * self.hashtag_slope).min(self.hashtag_cap)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let probabilities = [
            ("policy.vocabulary_cap", self.vocabulary_cap),
            ("policy.hashtag_cap", self.hashtag_cap),
            ("policy.region_confidence", self.region_confidence),
            ("policy.weight_confidence", self.weight_confidence),
            ("policy.enthusiasm_confidence", self.enthusiasm_confidence),
            ("policy.conversational_confidence", self.conversational_confidence),
            ("policy.vocabulary_report_threshold", self.vocabulary_report_threshold),
            ("policy.weight_report_threshold", self.weight_report_threshold),
        ];
        for (field, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfRange {
                    field,
                    value,
                    reason: "must lie in [0, 1]",
                });
            }
        }
        Ok(())
    }
}
