use std::collections::BTreeMap;

use momentum_types::MomentumAnomaly;
use serde::{Deserialize, Serialize};

/// Cheap health-check view: detection output plus summary statistics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub anomalies: Vec<MomentumAnomaly>,
    /// Subset of `anomalies` at least the evergreen age floor old.
    pub evergreen_anomalies: Vec<MomentumAnomaly>,
    pub quick_stats: QuickStats,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct QuickStats {
    pub total_anomalies: usize,
    /// Mean ratio rounded to two decimals; 0 when there are no anomalies.
    pub avg_anomaly_ratio: f64,
    /// Highest-ratio anomaly.
    pub top_performer: Option<MomentumAnomaly>,
    /// Anomaly count per region; anomalies without a region are not counted.
    pub region_distribution: BTreeMap<String, usize>,
}

impl QuickStats {
    /// Summarize a ranked anomaly batch (highest ratio first).
    pub fn from_anomalies(anomalies: &[MomentumAnomaly]) -> Self {
        if anomalies.is_empty() {
            return Self::default();
        }

        let mean = anomalies.iter().map(|a| a.anomaly_ratio).sum::<f64>() / anomalies.len() as f64;

        let top_performer = anomalies
            .iter()
            .fold(None::<&MomentumAnomaly>, |best, a| match best {
                Some(b) if b.anomaly_ratio >= a.anomaly_ratio => Some(b),
                _ => Some(a),
            })
            .cloned();

        let mut region_distribution = BTreeMap::new();
        for region in anomalies.iter().filter_map(|a| a.region.as_ref()) {
            *region_distribution.entry(region.clone()).or_insert(0) += 1;
        }

        Self {
            total_anomalies: anomalies.len(),
            avg_anomaly_ratio: (mean * 100.0).round() / 100.0,
            top_performer,
            region_distribution,
        }
    }
}
