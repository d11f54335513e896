//! Orchestration for momentum-driven scoring-policy evolution.
//!
//! ```text
//! repository ─► AnomalyDetector ─► PatternExtractor ─► PromptEvolver ─► EvolutionReport
//!                    │
//!                    └──────────► diagnose (anomalies, evergreens, quick stats)
//! ```
//!
//! Both entry points perform exactly one repository read followed by pure,
//! synchronous computation, so concurrent invocations need no coordination.

#![deny(unsafe_code)]

mod diagnosis;
mod engine;
mod error;
pub mod settings;
pub mod telemetry;

pub use diagnosis::{Diagnosis, QuickStats};
pub use engine::EvolutionEngine;
pub use error::{EvolutionError, EvolutionResult};
pub use settings::{EngineSettings, LoggingConfig, StoreSettings};
