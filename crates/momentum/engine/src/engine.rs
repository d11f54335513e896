use std::sync::Arc;

use chrono::FixedOffset;
use momentum_detector::{filter_evergreen, AnomalyDetector, DEFAULT_EVERGREEN_MIN_AGE_HOURS};
use momentum_evolver::PromptEvolver;
use momentum_patterns::PatternExtractor;
use momentum_store::{CandidateRepository, InMemoryCandidateStore};
use momentum_types::{
    ConfidencePolicy, DetectionWindow, EvolutionConfig, EvolutionReport, MomentumAnomaly,
};
use tracing::{debug, info};

use crate::diagnosis::{Diagnosis, QuickStats};
use crate::error::{EvolutionError, EvolutionResult};
use crate::settings::{EngineSettings, StoreSettings};

/// Detect → extract → recommend → report.
///
/// Holds only read-only configuration; every call works on its own
/// repository snapshot.
pub struct EvolutionEngine {
    detector: AnomalyDetector,
    extractor: PatternExtractor,
    evolver: PromptEvolver,
    repository: Arc<dyn CandidateRepository>,
    evergreen_min_age_hours: f64,
    default_window: DetectionWindow,
}

impl EvolutionEngine {
    pub fn new(
        config: EvolutionConfig,
        policy: ConfidencePolicy,
        repository: Arc<dyn CandidateRepository>,
    ) -> EvolutionResult<Self> {
        config.validate()?;
        policy.validate()?;
        let evolver = PromptEvolver::new(policy, config.weights);
        Ok(Self {
            detector: AnomalyDetector::new(config),
            extractor: PatternExtractor::new(),
            evolver,
            repository,
            evergreen_min_age_hours: DEFAULT_EVERGREEN_MIN_AGE_HOURS,
            default_window: DetectionWindow::default(),
        })
    }

    /// Build an engine and its repository from loaded settings.
    pub async fn from_settings(settings: &EngineSettings) -> EvolutionResult<Self> {
        settings.validate()?;
        let repository = connect_store(&settings.store).await?;
        Ok(Self::new(settings.evolution.clone(), settings.policy.clone(), repository)?
            .with_evergreen_min_age_hours(settings.evergreen_min_age_hours)
            .with_default_window(settings.window)
            .with_posting_offset(settings.posting_offset()?))
    }

    pub fn with_evergreen_min_age_hours(mut self, hours: f64) -> Self {
        self.evergreen_min_age_hours = hours;
        self
    }

    /// Window used by [`evolve_default`](Self::evolve_default) and
    /// [`diagnose_default`](Self::diagnose_default).
    pub fn with_default_window(mut self, window: DetectionWindow) -> Self {
        self.default_window = window;
        self
    }

    pub fn with_posting_offset(mut self, offset: FixedOffset) -> Self {
        self.extractor = self.extractor.with_posting_offset(offset);
        self
    }

    pub fn with_extractor(mut self, extractor: PatternExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn config(&self) -> &EvolutionConfig {
        self.detector.config()
    }

    pub fn evergreen_min_age_hours(&self) -> f64 {
        self.evergreen_min_age_hours
    }

    pub fn default_window(&self) -> &DetectionWindow {
        &self.default_window
    }

    /// The ranked anomaly batch for `window`.
    pub async fn find_anomalies(&self, window: &DetectionWindow) -> EvolutionResult<Vec<MomentumAnomaly>> {
        Ok(self.detector.find_anomalies(self.repository.as_ref(), window).await?)
    }

    /// Anomalies still above threshold after the evergreen age floor.
    pub async fn find_evergreen_anomalies(
        &self,
        window: &DetectionWindow,
    ) -> EvolutionResult<Vec<MomentumAnomaly>> {
        Ok(self
            .detector
            .find_evergreen_anomalies(self.repository.as_ref(), window, self.evergreen_min_age_hours)
            .await?)
    }

    /// Full pipeline. An empty anomaly batch short-circuits to the empty report.
    pub async fn evolve(&self, window: &DetectionWindow) -> EvolutionResult<EvolutionReport> {
        let anomalies = self.find_anomalies(window).await?;
        if anomalies.is_empty() {
            info!(window_days = window.days, "no anomalies; returning empty report");
            return Ok(EvolutionReport::empty(chrono::Utc::now()));
        }

        let patterns = self.extractor.analyze(&anomalies);
        debug!(
            anomalies = anomalies.len(),
            signals = patterns.culture_signals.len(),
            "patterns extracted"
        );
        let recommendations = self.evolver.generate_recommendations(&patterns, &anomalies);
        let report = self.evolver.generate_report(&anomalies, patterns, recommendations);

        info!(
            report_id = %report.id,
            anomalies = report.anomalies_analyzed,
            recommendations = report.recommendations.len(),
            "evolution complete"
        );
        Ok(report)
    }

    pub async fn evolve_default(&self) -> EvolutionResult<EvolutionReport> {
        self.evolve(&self.default_window).await
    }

    /// Detection plus summary statistics; skips extraction and recommendation.
    pub async fn diagnose(&self, window: &DetectionWindow) -> EvolutionResult<Diagnosis> {
        let anomalies = self.find_anomalies(window).await?;
        let evergreen_anomalies = filter_evergreen(&anomalies, self.evergreen_min_age_hours);
        let quick_stats = QuickStats::from_anomalies(&anomalies);

        info!(
            anomalies = anomalies.len(),
            evergreen = evergreen_anomalies.len(),
            avg_ratio = quick_stats.avg_anomaly_ratio,
            "diagnosis complete"
        );
        Ok(Diagnosis {
            anomalies,
            evergreen_anomalies,
            quick_stats,
        })
    }

    pub async fn diagnose_default(&self) -> EvolutionResult<Diagnosis> {
        self.diagnose(&self.default_window).await
    }
}

impl std::fmt::Debug for EvolutionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvolutionEngine")
            .field("detector", &self.detector)
            .field("extractor", &self.extractor)
            .field("evolver", &self.evolver)
            .field("evergreen_min_age_hours", &self.evergreen_min_age_hours)
            .field("default_window", &self.default_window)
            .finish_non_exhaustive()
    }
}

async fn connect_store(settings: &StoreSettings) -> EvolutionResult<Arc<dyn CandidateRepository>> {
    match settings {
        StoreSettings::Memory => Ok(Arc::new(InMemoryCandidateStore::new())),
        #[cfg(feature = "postgres")]
        StoreSettings::Postgres {
            url,
            max_connections,
            connect_timeout_secs,
        } => {
            let store = momentum_store::postgres::PostgresCandidateStore::connect_with_options(
                url,
                *max_connections,
                *connect_timeout_secs,
            )
            .await
            .map_err(EvolutionError::DataSource)?;
            Ok(Arc::new(store))
        }
        #[cfg(not(feature = "postgres"))]
        StoreSettings::Postgres { .. } => Err(EvolutionError::Config(
            "postgres store requires the `postgres` feature".into(),
        )),
    }
}
