//! Pattern extraction over an anomaly set.
//!
//! [`PatternExtractor::analyze`] reduces anomalies to a [`PatternAnalysis`]:
//! dialect markers, corpus statistics, hashtag/region tallies, posting hours and
//! culture signals. Candidate new vocabulary is flagged by a pluggable
//! [`TermHeuristic`], which is a heuristic and not ground truth.
//!
//! [`PatternAnalysis`]: momentum_types::PatternAnalysis

#![deny(unsafe_code)]

mod extractor;
mod heuristic;
pub mod lexicon;

pub use extractor::PatternExtractor;
pub use heuristic::{DialectMorphologyHeuristic, TermHeuristic};
