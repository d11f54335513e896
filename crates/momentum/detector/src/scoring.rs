use chrono::{DateTime, Utc};
use momentum_types::{EngagementCounts, EngagementWeights};

/// `fires·w_fires + shares·w_shares + tips·w_tips + comments·w_comments`.
pub fn weighted_engagement(counts: &EngagementCounts, weights: &EngagementWeights) -> f64 {
    counts.weighted(weights)
}

/// Time-decayed momentum. The `+1`/`+2` offsets keep `ln` and `powf` away from
/// their singularities.
pub fn momentum_score(predictive_score: f64, weighted: f64, age_hours: f64, gravity: f64) -> f64 {
    ((predictive_score + 1.0) * ((weighted + 1.0).ln() + 1.0)) / (age_hours + 2.0).powf(gravity)
}

/// Hours elapsed between `created_at` and `now`, clamped at zero.
pub fn age_hours(created_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let millis = (now - created_at).num_milliseconds();
    (millis as f64 / 3_600_000.0).max(0.0)
}
