//! Recommendations and the evolution report.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::anomaly::EngagementKind;
use crate::patterns::PatternAnalysis;

// ── Identifier ──────────────────────────────────────────────────────────

/// Unique identifier for a generated report.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportId(pub String);

impl ReportId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl Default for ReportId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ReportId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "report:{}", self.0)
    }
}

// ── Recommendation ──────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    AddVocabularyTerm,
    AdjustWeight,
    AddHashtagBonus,
    RegionBoost,
    HeuristicUpdate,
}

impl std::fmt::Display for RecommendationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AddVocabularyTerm => write!(f, "add_vocabulary_term"),
            Self::AdjustWeight => write!(f, "adjust_weight"),
            Self::AddHashtagBonus => write!(f, "add_hashtag_bonus"),
            Self::RegionBoost => write!(f, "region_boost"),
            Self::HeuristicUpdate => write!(f, "heuristic_update"),
        }
    }
}

/// The concrete policy change a recommendation proposes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RecommendationAction {
    AddVocabularyTerm {
        term: String,
    },
    AdjustWeight {
        kind: EngagementKind,
        current_weight: f64,
        proposed_weight: f64,
    },
    AddHashtagBonus {
        tag: String,
    },
    RegionBoost {
        region: String,
        bonus: f64,
    },
    HeuristicUpdate {
        guidance: String,
    },
}

impl RecommendationAction {
    pub fn kind(&self) -> RecommendationKind {
        match self {
            Self::AddVocabularyTerm { .. } => RecommendationKind::AddVocabularyTerm,
            Self::AdjustWeight { .. } => RecommendationKind::AdjustWeight,
            Self::AddHashtagBonus { .. } => RecommendationKind::AddHashtagBonus,
            Self::RegionBoost { .. } => RecommendationKind::RegionBoost,
            Self::HeuristicUpdate { .. } => RecommendationKind::HeuristicUpdate,
        }
    }
}

/// One suggested scoring-policy change with its supporting evidence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvolutionRecommendation {
    /// Always equal to `action.kind()`.
    pub kind: RecommendationKind,
    /// Calibrated confidence in [0, 1].
    pub confidence: f64,
    pub description: String,
    pub action: RecommendationAction,
    /// Sample content ids supporting the claim.
    pub evidence: Vec<String>,
}

impl EvolutionRecommendation {
    pub fn new(action: RecommendationAction, confidence: f64, description: impl Into<String>) -> Self {
        Self {
            kind: action.kind(),
            confidence: confidence.clamp(0.0, 1.0),
            description: description.into(),
            action,
            evidence: Vec::new(),
        }
    }

    pub fn with_evidence(mut self, evidence: Vec<String>) -> Self {
        self.evidence = evidence;
        self
    }
}

// ── Report ──────────────────────────────────────────────────────────────

/// Derived summary of the high-confidence changes in a report.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyUpdates {
    pub vocabulary_additions: Vec<String>,
    pub weight_adjustments: BTreeMap<EngagementKind, f64>,
    pub new_heuristics: Vec<String>,
}

impl PolicyUpdates {
    pub fn is_empty(&self) -> bool {
        self.vocabulary_additions.is_empty()
            && self.weight_adjustments.is_empty()
            && self.new_heuristics.is_empty()
    }
}

/// Aggregate output of one evolution run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvolutionReport {
    pub id: ReportId,
    pub generated_at: DateTime<Utc>,
    pub anomalies_analyzed: usize,
    pub patterns: PatternAnalysis,
    /// Sorted descending by confidence.
    pub recommendations: Vec<EvolutionRecommendation>,
    pub policy_updates: PolicyUpdates,
}

impl EvolutionReport {
    /// The canonical report for a window with no qualifying anomalies.
    pub fn empty(generated_at: DateTime<Utc>) -> Self {
        Self {
            id: ReportId::new(),
            generated_at,
            anomalies_analyzed: 0,
            patterns: PatternAnalysis::empty(),
            recommendations: Vec::new(),
            policy_updates: PolicyUpdates::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.anomalies_analyzed == 0
    }
}
