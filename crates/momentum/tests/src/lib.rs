//! Shared fixtures for the momentum integration and property tests.

use chrono::{DateTime, Duration, Utc};
use momentum_store::RawCandidate;
use momentum_types::{EngagementCounts, MomentumAnomaly};

/// A visible candidate created `age_hours` before `now`.
pub fn candidate(
    id: &str,
    predictive_score: f64,
    engagement: EngagementCounts,
    age_hours: i64,
    now: DateTime<Utc>,
) -> RawCandidate {
    RawCandidate::new(id, "tester", "allo", predictive_score, now - Duration::hours(age_hours))
        .with_engagement(engagement)
}

/// An anomaly carrying `body` with neutral scores; callers override fields as needed.
pub fn anomaly(id: &str, body: &str) -> MomentumAnomaly {
    MomentumAnomaly {
        content_id: id.to_string(),
        author_id: format!("user-{id}"),
        author_handle: format!("handle-{id}"),
        body_text: body.to_string(),
        caption_text: None,
        hashtags: Vec::new(),
        region: None,
        predictive_score: 1.0,
        momentum_score: 2.0,
        anomaly_ratio: 2.0,
        engagement: EngagementCounts::new(10, 0, 0, 0),
        weighted_engagement: 10.0,
        has_media: false,
        age_hours: 6.0,
        created_at: Utc::now() - Duration::hours(6),
    }
}
