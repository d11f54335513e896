//! Property tests: pattern analysis is total, deterministic and bounded.

use momentum_patterns::PatternExtractor;
use momentum_tests::anomaly;
use momentum_types::{CultureSignal, MomentumAnomaly, PatternAnalysis};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Helpers / Strategies
// ---------------------------------------------------------------------------

fn arb_body() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("toé"),
            Just("icitte"),
            Just("toune"),
            Just("j'pense"),
            Just("l'hiver"),
            Just("poutine"),
            Just("allo"),
            Just("quoi?"),
            Just("wow!"),
            Just("!!"),
            Just("la gang"),
            Just("Montréal"),
        ],
        0..12,
    )
    .prop_map(|words| words.join(" "))
}

fn arb_anomalies(max: usize) -> impl Strategy<Value = Vec<MomentumAnomaly>> {
    prop::collection::vec(
        (
            arb_body(),
            prop::collection::vec(prop_oneof![Just("#poutine"), Just("#mtl"), Just("#Hiver")], 0..3),
            prop::option::of(prop_oneof![Just("Montréal"), Just("Gaspésie"), Just("Laval")]),
            0.0f64..200.0,
        ),
        0..max,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (body, tags, region, age))| {
                let mut a = anomaly(&format!("a{i}"), &body);
                a.hashtags = tags.into_iter().map(str::to_string).collect();
                a.region = region.map(str::to_string);
                a.age_hours = age;
                a
            })
            .collect()
    })
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[test]
fn empty_input_is_canonical() {
    assert_eq!(PatternExtractor::new().analyze(&[]), PatternAnalysis::empty());
}

proptest! {
    #[test]
    fn analyze_is_idempotent(anomalies in arb_anomalies(20)) {
        let x = PatternExtractor::new();
        let first = x.analyze(&anomalies);
        let second = x.analyze(&anomalies);
        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
        prop_assert_eq!(first, second);
    }

    #[test]
    fn collections_are_bounded_and_ranked(anomalies in arb_anomalies(30)) {
        let p = PatternExtractor::new().analyze(&anomalies);
        prop_assert!(p.top_hashtags.len() <= 10);
        prop_assert!(p.top_regions.len() <= 5);
        prop_assert!(p.peak_posting_hours.len() <= 3);
        prop_assert!(p.peak_posting_hours.iter().all(|h| *h < 24));
        for pair in p.top_hashtags.windows(2) {
            prop_assert!(pair[0].count >= pair[1].count);
        }
        for pair in p.top_regions.windows(2) {
            prop_assert!(pair[0].count >= pair[1].count);
        }
        prop_assert!(p.joual_density.is_finite() && p.joual_density >= 0.0);
    }

    #[test]
    fn signal_thresholds_hold(anomalies in arb_anomalies(20)) {
        prop_assume!(!anomalies.is_empty());
        let n = anomalies.len();
        let p = PatternExtractor::new().analyze(&anomalies);
        prop_assert_eq!(
            p.has_signal(CultureSignal::HighEnthusiasm),
            p.exclamation_count > 2 * n
        );
        prop_assert_eq!(
            p.has_signal(CultureSignal::ConversationalStyle),
            p.question_count > n
        );
        prop_assert!(p.emerging_terms.iter().all(|t| !p.known_markers.contains(t)));
    }
}
