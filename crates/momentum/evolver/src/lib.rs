//! Turns a pattern analysis and its anomaly set into ranked recommendations
//! and assembles the evolution report.

#![deny(unsafe_code)]

mod evolver;
mod report;

pub use evolver::PromptEvolver;
pub use report::summarize_policy_updates;
