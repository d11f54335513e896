//! Property tests: detection output always honours its filters, ordering and batch size,
//! and evergreen anomalies are an age-filtered subset of the full batch.

use chrono::{DateTime, TimeZone, Utc};
use momentum_detector::{filter_evergreen, AnomalyDetector};
use momentum_store::RawCandidate;
use momentum_tests::candidate;
use momentum_types::{EngagementCounts, EvolutionConfig};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Helpers / Strategies
// ---------------------------------------------------------------------------

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap()
}

fn arb_engagement() -> impl Strategy<Value = EngagementCounts> {
    (0u64..200, 0u64..50, 0u64..10, 0u64..50)
        .prop_map(|(fires, shares, tips, comments)| EngagementCounts::new(fires, shares, tips, comments))
}

fn arb_candidates(max: usize) -> impl Strategy<Value = Vec<RawCandidate>> {
    prop::collection::vec((0.01f64..10.0, arb_engagement(), 0i64..720), 0..max).prop_map(|rows| {
        let now = fixed_now();
        rows.into_iter()
            .enumerate()
            .map(|(i, (score, engagement, age))| {
                candidate(&format!("c{i}"), score, engagement, age, now)
            })
            .collect()
    })
}

fn arb_config() -> impl Strategy<Value = EvolutionConfig> {
    (0.0f64..5.0, 0.0f64..50.0, 1usize..40, 0.0f64..2.5).prop_map(
        |(threshold, min_engagement, batch, gravity)| {
            EvolutionConfig::default()
                .with_anomaly_threshold(threshold)
                .with_min_engagement(min_engagement)
                .with_batch_size(batch)
                .with_gravity(gravity)
        },
    )
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn anomalies_satisfy_thresholds(config in arb_config(), rows in arb_candidates(60)) {
        let detector = AnomalyDetector::new(config.clone());
        let anomalies = detector.score_candidates(&rows, fixed_now());
        prop_assert!(anomalies.len() <= config.batch_size);
        for a in &anomalies {
            prop_assert!(a.anomaly_ratio >= config.anomaly_threshold);
            prop_assert!(a.weighted_engagement >= config.min_engagement);
        }
    }

    #[test]
    fn anomalies_sorted_by_ratio(config in arb_config(), rows in arb_candidates(60)) {
        let anomalies = AnomalyDetector::new(config).score_candidates(&rows, fixed_now());
        for pair in anomalies.windows(2) {
            prop_assert!(pair[0].anomaly_ratio >= pair[1].anomaly_ratio);
        }
    }

    #[test]
    fn evergreen_is_subset(
        config in arb_config(),
        rows in arb_candidates(60),
        min_age in 0.0f64..200.0,
    ) {
        let all = AnomalyDetector::new(config).score_candidates(&rows, fixed_now());
        let evergreen = filter_evergreen(&all, min_age);
        let expected: Vec<_> = all.iter().filter(|a| a.age_hours >= min_age).cloned().collect();
        prop_assert_eq!(&evergreen, &expected);
        for a in &evergreen {
            prop_assert!(all.iter().any(|b| b.content_id == a.content_id));
        }
    }

    #[test]
    fn scoring_is_deterministic(config in arb_config(), rows in arb_candidates(30)) {
        let detector = AnomalyDetector::new(config);
        let first = detector.score_candidates(&rows, fixed_now());
        let second = detector.score_candidates(&rows, fixed_now());
        prop_assert_eq!(first, second);
    }
}
