use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use momentum_types::{
    ConfidencePolicy, CultureSignal, EngagementCounts, EngagementKind, EngagementWeights,
    EvolutionRecommendation, EvolutionReport, MomentumAnomaly, PatternAnalysis,
    RecommendationAction, ReportId,
};
use tracing::debug;

use crate::report::summarize_policy_updates;

const ENTHUSIASM_GUIDANCE: &str = "Content with an enthusiastic, excited tone tends to resonate";
const CONVERSATIONAL_GUIDANCE: &str = "Content that asks the audience questions tends to resonate";

/// Synthesizes scoring-policy recommendations from observed patterns.
#[derive(Clone, Debug)]
pub struct PromptEvolver {
    policy: ConfidencePolicy,
    /// Weights currently in force; the share-weight proposal starts from these.
    weights: EngagementWeights,
}

impl PromptEvolver {
    pub fn new(policy: ConfidencePolicy, weights: EngagementWeights) -> Self {
        Self { policy, weights }
    }

    pub fn policy(&self) -> &ConfidencePolicy {
        &self.policy
    }

    /// All recommendations, sorted descending by confidence (stable on ties).
    pub fn generate_recommendations(
        &self,
        patterns: &PatternAnalysis,
        anomalies: &[MomentumAnomaly],
    ) -> Vec<EvolutionRecommendation> {
        if anomalies.is_empty() {
            return Vec::new();
        }

        let mut recommendations = Vec::new();
        recommendations.extend(self.vocabulary_additions(patterns, anomalies));
        recommendations.extend(self.hashtag_bonuses(patterns, anomalies));
        recommendations.extend(self.region_boosts(patterns, anomalies));
        recommendations.extend(self.weight_adjustment(anomalies));
        recommendations.extend(self.heuristic_updates(patterns));

        recommendations.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(Ordering::Equal)
        });

        debug!(
            anomalies = anomalies.len(),
            recommendations = recommendations.len(),
            policy_version = %self.policy.version,
            "generated recommendations"
        );
        recommendations
    }

    /// Compose the report, stamped with the current time.
    pub fn generate_report(
        &self,
        anomalies: &[MomentumAnomaly],
        patterns: PatternAnalysis,
        recommendations: Vec<EvolutionRecommendation>,
    ) -> EvolutionReport {
        self.generate_report_at(anomalies, patterns, recommendations, Utc::now())
    }

    pub fn generate_report_at(
        &self,
        anomalies: &[MomentumAnomaly],
        patterns: PatternAnalysis,
        recommendations: Vec<EvolutionRecommendation>,
        generated_at: DateTime<Utc>,
    ) -> EvolutionReport {
        let policy_updates = summarize_policy_updates(&recommendations, &self.policy);
        EvolutionReport {
            id: ReportId::new(),
            generated_at,
            anomalies_analyzed: anomalies.len(),
            patterns,
            recommendations,
            policy_updates,
        }
    }

    // ── Generators ──────────────────────────────────────────────────────

    fn vocabulary_additions(
        &self,
        patterns: &PatternAnalysis,
        anomalies: &[MomentumAnomaly],
    ) -> Vec<EvolutionRecommendation> {
        if patterns.emerging_terms.is_empty() {
            return Vec::new();
        }
        let n = anomalies.len() as f64;
        let texts: Vec<(&str, String)> = anomalies
            .iter()
            .map(|a| (a.content_id.as_str(), fold(&a.text())))
            .collect();

        let mut frequent: Vec<(&String, f64, Vec<String>)> = patterns
            .emerging_terms
            .iter()
            .filter_map(|term| {
                let supporting: Vec<String> = texts
                    .iter()
                    .filter(|(_, text)| text.contains(term.as_str()))
                    .map(|(id, _)| id.to_string())
                    .collect();
                (supporting.len() >= self.policy.vocabulary_min_anomalies)
                    .then(|| (term, supporting.len() as f64 / n, supporting))
            })
            .collect();
        frequent.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        frequent
            .into_iter()
            .map(|(term, frequency, supporting)| {
                EvolutionRecommendation::new(
                    RecommendationAction::AddVocabularyTerm { term: term.clone() },
                    self.policy.vocabulary_confidence(frequency),
                    format!(
                        "Add \"{term}\" to the dialect marker dictionary (in {}/{} anomalies)",
                        supporting.len(),
                        anomalies.len()
                    ),
                )
                .with_evidence(self.cap_evidence(supporting))
            })
            .collect()
    }

    fn hashtag_bonuses(
        &self,
        patterns: &PatternAnalysis,
        anomalies: &[MomentumAnomaly],
    ) -> Vec<EvolutionRecommendation> {
        let n = anomalies.len() as f64;
        patterns
            .top_hashtags
            .iter()
            .filter(|h| h.count as f64 >= self.policy.hashtag_min_share * n)
            .map(|h| {
                let evidence = anomalies
                    .iter()
                    .filter(|a| a.has_hashtag(&h.tag))
                    .map(|a| a.content_id.clone())
                    .collect();
                EvolutionRecommendation::new(
                    RecommendationAction::AddHashtagBonus { tag: h.tag.clone() },
                    self.policy.hashtag_confidence(h.count as f64 / n),
                    format!(
                        "Add culture bonus for #{} (appeared in {}/{} anomalies)",
                        h.tag,
                        h.count,
                        anomalies.len()
                    ),
                )
                .with_evidence(self.cap_evidence(evidence))
            })
            .collect()
    }

    fn region_boosts(
        &self,
        patterns: &PatternAnalysis,
        anomalies: &[MomentumAnomaly],
    ) -> Vec<EvolutionRecommendation> {
        let n = anomalies.len() as f64;
        patterns
            .top_regions
            .iter()
            .filter(|r| r.count as f64 >= self.policy.region_min_share * n)
            .map(|r| {
                let evidence = anomalies
                    .iter()
                    .filter(|a| a.region.as_deref() == Some(r.region.as_str()))
                    .map(|a| a.content_id.clone())
                    .collect();
                EvolutionRecommendation::new(
                    RecommendationAction::RegionBoost {
                        region: r.region.clone(),
                        bonus: self.policy.region_bonus,
                    },
                    self.policy.region_confidence,
                    format!("Increase culture bonus for region: {}", r.region),
                )
                .with_evidence(self.cap_evidence(evidence))
            })
            .collect()
    }

    fn weight_adjustment(&self, anomalies: &[MomentumAnomaly]) -> Option<EvolutionRecommendation> {
        let totals = anomalies
            .iter()
            .fold(EngagementCounts::default(), |acc, a| acc.accumulate(&a.engagement));
        let total = totals.total();
        if total == 0 {
            return None;
        }
        let share_ratio = totals.shares as f64 / total as f64;
        if share_ratio <= self.policy.share_ratio_trigger {
            return None;
        }

        let current = self.weights.shares;
        let proposed = (current * (1.0 + share_ratio)).round();

        let mut by_shares: Vec<&MomentumAnomaly> = anomalies.iter().collect();
        by_shares.sort_by(|a, b| b.engagement.shares.cmp(&a.engagement.shares));
        let evidence = by_shares
            .into_iter()
            .map(|a| a.content_id.clone())
            .collect();

        Some(
            EvolutionRecommendation::new(
                RecommendationAction::AdjustWeight {
                    kind: EngagementKind::Shares,
                    current_weight: current,
                    proposed_weight: proposed,
                },
                self.policy.weight_confidence,
                format!(
                    "Shares are {}% of engagement in anomalies; raise weight {current} -> {proposed}",
                    (share_ratio * 100.0).round()
                ),
            )
            .with_evidence(self.cap_evidence(evidence)),
        )
    }

    fn heuristic_updates(&self, patterns: &PatternAnalysis) -> Vec<EvolutionRecommendation> {
        let mut updates = Vec::new();
        if patterns.has_signal(CultureSignal::HighEnthusiasm) {
            updates.push(EvolutionRecommendation::new(
                RecommendationAction::HeuristicUpdate {
                    guidance: ENTHUSIASM_GUIDANCE.into(),
                },
                self.policy.enthusiasm_confidence,
                "enthusiastic tone correlates with outperformance",
            ));
        }
        if patterns.has_signal(CultureSignal::ConversationalStyle) {
            updates.push(EvolutionRecommendation::new(
                RecommendationAction::HeuristicUpdate {
                    guidance: CONVERSATIONAL_GUIDANCE.into(),
                },
                self.policy.conversational_confidence,
                "conversational style correlates with outperformance",
            ));
        }
        updates
    }

    fn cap_evidence(&self, mut ids: Vec<String>) -> Vec<String> {
        ids.truncate(self.policy.max_evidence);
        ids
    }
}

impl Default for PromptEvolver {
    fn default() -> Self {
        Self::new(ConfidencePolicy::default(), EngagementWeights::default())
    }
}

fn fold(text: &str) -> String {
    text.to_lowercase().replace('\u{2019}', "'")
}
