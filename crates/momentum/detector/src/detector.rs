use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use momentum_store::{CandidateRepository, RawCandidate, StoreResult};
use momentum_types::{DetectionWindow, EvolutionConfig, MomentumAnomaly};
use tracing::{debug, warn};

use crate::scoring::{age_hours, momentum_score, weighted_engagement};

/// Age floor for "still hot" content.
pub const DEFAULT_EVERGREEN_MIN_AGE_HOURS: f64 = 48.0;

/// Scores repository candidates and keeps those that outperform their prediction.
#[derive(Clone, Debug)]
pub struct AnomalyDetector {
    config: EvolutionConfig,
}

impl AnomalyDetector {
    pub fn new(config: EvolutionConfig) -> Self {
        Self { config }
    }

    pub fn with_default_config() -> Self {
        Self::new(EvolutionConfig::default())
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// Fetch candidates in `window` and return the ranked anomaly batch.
    ///
    /// Zero matches is an empty vector, never an error. Repository failures
    /// propagate unchanged.
    pub async fn find_anomalies<R>(
        &self,
        repository: &R,
        window: &DetectionWindow,
    ) -> StoreResult<Vec<MomentumAnomaly>>
    where
        R: CandidateRepository + ?Sized,
    {
        let candidates = repository.fetch_candidates(window).await?;
        Ok(self.score_candidates(&candidates, Utc::now()))
    }

    /// [`find_anomalies`](Self::find_anomalies) restricted to `age_hours >= min_age_hours`.
    pub async fn find_evergreen_anomalies<R>(
        &self,
        repository: &R,
        window: &DetectionWindow,
        min_age_hours: f64,
    ) -> StoreResult<Vec<MomentumAnomaly>>
    where
        R: CandidateRepository + ?Sized,
    {
        let anomalies = self.find_anomalies(repository, window).await?;
        Ok(filter_evergreen(&anomalies, min_age_hours))
    }

    /// Pure scoring core: score, filter, rank by ratio and truncate to the batch size.
    pub fn score_candidates(
        &self,
        candidates: &[RawCandidate],
        now: DateTime<Utc>,
    ) -> Vec<MomentumAnomaly> {
        let mut anomalies: Vec<MomentumAnomaly> = candidates
            .iter()
            .filter_map(|c| self.score_one(c, now))
            .filter(|a| {
                a.weighted_engagement >= self.config.min_engagement
                    && a.anomaly_ratio >= self.config.anomaly_threshold
            })
            .collect();

        anomalies.sort_by(|a, b| {
            b.anomaly_ratio
                .partial_cmp(&a.anomaly_ratio)
                .unwrap_or(Ordering::Equal)
        });
        anomalies.truncate(self.config.batch_size);

        debug!(
            candidates = candidates.len(),
            anomalies = anomalies.len(),
            threshold = self.config.anomaly_threshold,
            "scored candidates"
        );
        anomalies
    }

    fn score_one(&self, candidate: &RawCandidate, now: DateTime<Utc>) -> Option<MomentumAnomaly> {
        let predictive = candidate.predictive_score;
        if !predictive.is_finite() || predictive <= 0.0 {
            warn!(
                content_id = %candidate.id,
                predictive_score = predictive,
                "repository returned a candidate without a positive predictive score; skipping"
            );
            return None;
        }

        let weighted = weighted_engagement(&candidate.engagement, &self.config.weights);
        let age = age_hours(candidate.created_at, now);
        let momentum = momentum_score(predictive, weighted, age, self.config.gravity);

        Some(MomentumAnomaly {
            content_id: candidate.id.clone(),
            author_id: candidate.author_id.clone(),
            author_handle: candidate.author_handle.clone(),
            body_text: candidate.body.clone(),
            caption_text: candidate.caption.clone(),
            hashtags: candidate.hashtags.clone(),
            region: candidate.region.clone(),
            predictive_score: predictive,
            momentum_score: momentum,
            anomaly_ratio: momentum / predictive,
            engagement: candidate.engagement,
            weighted_engagement: weighted,
            has_media: candidate.has_media,
            age_hours: age,
            created_at: candidate.created_at,
        })
    }
}

impl Default for AnomalyDetector {
    fn default() -> Self {
        Self::with_default_config()
    }
}

/// Anomalies at least `min_age_hours` old, in their original order.
pub fn filter_evergreen(anomalies: &[MomentumAnomaly], min_age_hours: f64) -> Vec<MomentumAnomaly> {
    anomalies
        .iter()
        .filter(|a| a.age_hours >= min_age_hours)
        .cloned()
        .collect()
}
