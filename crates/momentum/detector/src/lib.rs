//! Anomaly detection: content whose observed momentum outpaces its predictive score.
//!
//! Scoring is a gravity-decayed "hot" rank whose numerator is modulated by the
//! predictive score, so the resulting ratio measures momentum *relative to
//! expectation*:
//!
//! ```text
//! momentum = ((score + 1) · (ln(weighted + 1) + 1)) / (age_hours + 2)^gravity
//! ratio    = momentum / score
//! ```

#![deny(unsafe_code)]

mod detector;
mod scoring;

pub use detector::{filter_evergreen, AnomalyDetector, DEFAULT_EVERGREEN_MIN_AGE_HOURS};
pub use scoring::{age_hours, momentum_score, weighted_engagement};
