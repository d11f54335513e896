use momentum_types::{ConfidencePolicy, EvolutionRecommendation, PolicyUpdates, RecommendationAction};

/// Extract the high-confidence policy changes from a recommendation list.
///
/// Vocabulary terms and weight changes must clear the policy's report
/// thresholds; every heuristic update is kept.
pub fn summarize_policy_updates(
    recommendations: &[EvolutionRecommendation],
    policy: &ConfidencePolicy,
) -> PolicyUpdates {
    let mut updates = PolicyUpdates::default();
    for rec in recommendations {
        match &rec.action {
            RecommendationAction::AddVocabularyTerm { term } => {
                if rec.confidence >= policy.vocabulary_report_threshold
                    && !updates.vocabulary_additions.contains(term)
                {
                    updates.vocabulary_additions.push(term.clone());
                }
            }
            RecommendationAction::AdjustWeight {
                kind,
                proposed_weight,
                ..
            } => {
                if rec.confidence >= policy.weight_report_threshold {
                    updates.weight_adjustments.insert(*kind, *proposed_weight);
                }
            }
            RecommendationAction::HeuristicUpdate { .. } => {
                updates.new_heuristics.push(rec.description.clone());
            }
            RecommendationAction::AddHashtagBonus { .. } | RecommendationAction::RegionBoost { .. } => {}
        }
    }
    updates
}
