#![deny(unsafe_code)]
//! # momentum-types
//!
//! Shared value objects for the momentum evolution pipeline:
//!
//! ```text
//!   RawCandidate ──► MomentumAnomaly ──► PatternAnalysis ──► EvolutionRecommendation
//!                                                                   │
//!                                                                   ▼
//!                                                            EvolutionReport
//! ```
//!
//! Everything here is created fresh per pipeline run and never mutated after
//! construction. Tunables live in [`EvolutionConfig`] (detection) and
//! [`ConfidencePolicy`] (recommendation calibration).

pub mod anomaly;
pub mod config;
pub mod error;
pub mod patterns;
pub mod policy;
pub mod recommendation;

pub use anomaly::{normalize_hashtag, EngagementCounts, EngagementKind, MomentumAnomaly};
pub use config::{DetectionWindow, EngagementWeights, EvolutionConfig};
pub use error::{ConfigError, ConfigResult};
pub use patterns::{CultureSignal, PatternAnalysis, RegionCount, SentenceStyle, TagCount};
pub use policy::ConfidencePolicy;
pub use recommendation::{
    EvolutionRecommendation, EvolutionReport, PolicyUpdates, RecommendationAction,
    RecommendationKind, ReportId,
};
