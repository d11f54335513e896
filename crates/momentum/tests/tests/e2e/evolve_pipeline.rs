//! E2E: repository → detector → extractor → evolver → report.

use std::sync::Arc;

use chrono::Utc;
use momentum_engine::{EvolutionEngine, EvolutionError};
use momentum_store::{CandidateRepository, InMemoryCandidateStore, RawCandidate, StoreError, StoreResult};
use momentum_tests::candidate;
use momentum_types::{
    ConfidencePolicy, CultureSignal, DetectionWindow, EngagementCounts, EngagementKind,
    EvolutionConfig, RecommendationKind,
};

fn engine(store: InMemoryCandidateStore, policy: ConfidencePolicy) -> EvolutionEngine {
    EvolutionEngine::new(
        EvolutionConfig::default()
            .with_gravity(0.2)
            .with_anomaly_threshold(1.5),
        policy,
        Arc::new(store),
    )
    .unwrap()
}

fn viral_store() -> InMemoryCandidateStore {
    let now = Utc::now();
    let rows = vec![
        candidate("p1", 0.5, EngagementCounts::new(50, 40, 1, 5), 3, now)
            .with_caption("Y fait frette à matin!!! c'est quoi la toune?")
            .with_hashtags(["#Poutine", "#mtl"])
            .with_region("Montréal")
            .with_media(),
        candidate("p2", 0.6, EngagementCounts::new(30, 30, 0, 4), 8, now)
            .with_caption("La toune de l'été!!! tu l'as entendue?")
            .with_hashtags(["#poutine"])
            .with_region("Montréal"),
        candidate("p3", 0.4, EngagementCounts::new(20, 25, 0, 10), 70, now)
            .with_caption("Encore la toune!!! pis toé? t'aimes-tu?")
            .with_hashtags(["#hiver"])
            .with_region("Québec"),
        // below the engagement floor
        candidate("quiet", 0.5, EngagementCounts::new(2, 0, 0, 0), 2, now),
        // excluded by the repository
        candidate("gone", 0.5, EngagementCounts::new(90, 90, 0, 0), 2, now).deleted(),
    ];
    InMemoryCandidateStore::with_candidates(rows)
}

#[tokio::test]
async fn viral_content_produces_ranked_report() {
    let report = engine(viral_store(), ConfidencePolicy::default())
        .evolve(&DetectionWindow::default())
        .await
        .unwrap();

    assert_eq!(report.anomalies_analyzed, 3);
    let p = &report.patterns;
    assert!(p.has_media);
    assert!(p.has_signal(CultureSignal::HighEnthusiasm));
    assert!(p.has_signal(CultureSignal::ConversationalStyle));
    assert!(p.has_signal(CultureSignal::MajorCityConcentration));
    assert!(p.emerging_terms.contains(&"toune".to_string()));
    assert_eq!(p.top_hashtags[0].tag, "poutine");
    assert_eq!(p.top_hashtags[0].count, 2);

    let kinds: Vec<_> = report.recommendations.iter().map(|r| r.kind).collect();
    assert!(kinds.contains(&RecommendationKind::AddHashtagBonus));
    assert!(kinds.contains(&RecommendationKind::RegionBoost));
    assert!(kinds.contains(&RecommendationKind::AdjustWeight));
    assert!(kinds.contains(&RecommendationKind::HeuristicUpdate));
    for pair in report.recommendations.windows(2) {
        assert!(pair[0].confidence >= pair[1].confidence);
    }

    // shares 95 / total 215 ≈ 0.44 → round(3 · 1.44) = 4
    assert_eq!(
        report.policy_updates.weight_adjustments.get(&EngagementKind::Shares),
        Some(&4.0)
    );
    assert_eq!(report.policy_updates.new_heuristics.len(), 2);
    // 0.3 + 1.0 · 0.1 stays below the 0.6 summary threshold
    assert!(report.policy_updates.vocabulary_additions.is_empty());
}

#[tokio::test]
async fn recalibrated_policy_promotes_vocabulary() {
    let policy = ConfidencePolicy {
        vocabulary_base: 0.5,
        vocabulary_slope: 0.3,
        ..ConfidencePolicy::default()
    };
    let report = engine(viral_store(), policy)
        .evolve(&DetectionWindow::default())
        .await
        .unwrap();
    assert_eq!(
        report.policy_updates.vocabulary_additions,
        vec!["toune".to_string()]
    );
}

#[tokio::test]
async fn report_serializes_for_http_layer() {
    let report = engine(viral_store(), ConfidencePolicy::default())
        .evolve(&DetectionWindow::default())
        .await
        .unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["anomalies_analyzed"], 3);
    assert!(json["patterns"]["culture_signals"]
        .as_array()
        .unwrap()
        .iter()
        .any(|s| s == "HIGH_ENTHUSIASM"));
    assert!(json["recommendations"][0]["action"]["type"].is_string());
}

#[tokio::test]
async fn quiet_window_yields_empty_report() {
    let now = Utc::now();
    let store = InMemoryCandidateStore::with_candidates(vec![candidate(
        "quiet",
        5.0,
        EngagementCounts::new(1, 0, 0, 0),
        1,
        now,
    )]);
    let report = engine(store, ConfidencePolicy::default())
        .evolve(&DetectionWindow::default())
        .await
        .unwrap();
    assert!(report.is_empty());
    assert!(report.recommendations.is_empty());
}

struct FlakyRepository;

#[async_trait::async_trait]
impl CandidateRepository for FlakyRepository {
    async fn fetch_candidates(&self, _: &DetectionWindow) -> StoreResult<Vec<RawCandidate>> {
        Err(StoreError::Query("relation \"publications\" does not exist".into()))
    }
}

#[tokio::test]
async fn query_failure_is_a_typed_error() {
    let engine = EvolutionEngine::new(
        EvolutionConfig::default(),
        ConfidencePolicy::default(),
        Arc::new(FlakyRepository),
    )
    .unwrap();
    match engine.evolve(&DetectionWindow::default()).await {
        Err(EvolutionError::DataSource(StoreError::Query(msg))) => assert!(msg.contains("publications")),
        other => panic!("expected data source error, got {other:?}"),
    }
}
