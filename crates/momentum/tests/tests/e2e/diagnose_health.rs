//! E2E: diagnose returns detection output and quick stats without running extraction.

use std::sync::Arc;

use chrono::Utc;
use momentum_engine::{EngineSettings, EvolutionEngine};
use momentum_store::InMemoryCandidateStore;
use momentum_tests::candidate;
use momentum_types::{ConfidencePolicy, DetectionWindow, EngagementCounts, EvolutionConfig};

fn store() -> InMemoryCandidateStore {
    let now = Utc::now();
    InMemoryCandidateStore::with_candidates(vec![
        candidate("fresh", 0.5, EngagementCounts::new(60, 10, 0, 0), 1, now).with_region("Montréal"),
        candidate("steady", 0.5, EngagementCounts::new(60, 10, 0, 0), 50, now).with_region("Laval"),
        candidate("classic", 0.5, EngagementCounts::new(60, 10, 0, 0), 120, now).with_region("Montréal"),
        candidate("ancient", 0.5, EngagementCounts::new(60, 10, 0, 0), 24 * 40, now),
    ])
}

fn engine() -> EvolutionEngine {
    EvolutionEngine::new(
        EvolutionConfig::default().with_gravity(0.1).with_anomaly_threshold(1.0),
        ConfidencePolicy::default(),
        Arc::new(store()),
    )
    .unwrap()
}

#[tokio::test]
async fn diagnosis_reports_evergreens_and_stats() {
    let d = engine().diagnose(&DetectionWindow::default()).await.unwrap();

    // "ancient" falls outside the 30-day window
    assert_eq!(d.quick_stats.total_anomalies, 3);
    let evergreen: Vec<_> = d.evergreen_anomalies.iter().map(|a| a.content_id.as_str()).collect();
    assert_eq!(evergreen, vec!["steady", "classic"]);
    assert!(d.evergreen_anomalies.iter().all(|a| a.age_hours >= 48.0));

    assert_eq!(
        d.quick_stats.top_performer.as_ref().map(|a| a.content_id.as_str()),
        Some("fresh")
    );
    assert_eq!(d.quick_stats.region_distribution.get("Montréal"), Some(&2));
    assert_eq!(d.quick_stats.region_distribution.get("Laval"), Some(&1));

    let mean = d.anomalies.iter().map(|a| a.anomaly_ratio).sum::<f64>() / 3.0;
    assert_eq!(d.quick_stats.avg_anomaly_ratio, (mean * 100.0).round() / 100.0);
}

#[tokio::test]
async fn diagnosis_matches_evergreen_detection() {
    let engine = engine();
    let window = DetectionWindow::default();
    let d = engine.diagnose(&window).await.unwrap();
    let all = engine.find_anomalies(&window).await.unwrap();
    let ids = |v: &[momentum_types::MomentumAnomaly]| -> Vec<String> {
        v.iter().map(|a| a.content_id.clone()).collect()
    };
    assert_eq!(ids(&d.anomalies), ids(&all));
}

#[tokio::test]
async fn empty_store_diagnosis_is_zeroed() {
    let engine = EvolutionEngine::from_settings(&EngineSettings::default())
        .await
        .unwrap();
    let d = engine.diagnose(&DetectionWindow::last_days(7)).await.unwrap();
    assert!(d.anomalies.is_empty());
    assert!(d.evergreen_anomalies.is_empty());
    assert_eq!(d.quick_stats.avg_anomaly_ratio, 0.0);
    assert!(d.quick_stats.top_performer.is_none());
}
