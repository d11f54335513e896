//! Engagement counters and the momentum anomaly record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::EngagementWeights;

/// The kinds of audience engagement tracked per content item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementKind {
    Fires,
    Shares,
    Tips,
    Comments,
}

impl EngagementKind {
    pub const ALL: [EngagementKind; 4] = [
        EngagementKind::Fires,
        EngagementKind::Shares,
        EngagementKind::Tips,
        EngagementKind::Comments,
    ];

    pub(crate) fn weight_field(self) -> &'static str {
        match self {
            Self::Fires => "weights.fires",
            Self::Shares => "weights.shares",
            Self::Tips => "weights.tips",
            Self::Comments => "weights.comments",
        }
    }
}

impl std::fmt::Display for EngagementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fires => write!(f, "fires"),
            Self::Shares => write!(f, "shares"),
            Self::Tips => write!(f, "tips"),
            Self::Comments => write!(f, "comments"),
        }
    }
}

/// Raw engagement counters for one content item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementCounts {
    pub fires: u64,
    pub shares: u64,
    pub tips: u64,
    pub comments: u64,
}

impl EngagementCounts {
    pub fn new(fires: u64, shares: u64, tips: u64, comments: u64) -> Self {
        Self {
            fires,
            shares,
            tips,
            comments,
        }
    }

    pub fn get(&self, kind: EngagementKind) -> u64 {
        match kind {
            EngagementKind::Fires => self.fires,
            EngagementKind::Shares => self.shares,
            EngagementKind::Tips => self.tips,
            EngagementKind::Comments => self.comments,
        }
    }

    /// Sum of all counters, unweighted.
    pub fn total(&self) -> u64 {
        self.fires + self.shares + self.tips + self.comments
    }

    /// `fires·w_fires + shares·w_shares + tips·w_tips + comments·w_comments`.
    pub fn weighted(&self, weights: &EngagementWeights) -> f64 {
        EngagementKind::ALL
            .iter()
            .map(|&k| self.get(k) as f64 * weights.get(k))
            .sum()
    }

    /// Component-wise sum, used to total engagement across an anomaly set.
    pub fn accumulate(self, other: &EngagementCounts) -> Self {
        Self {
            fires: self.fires + other.fires,
            shares: self.shares + other.shares,
            tips: self.tips + other.tips,
            comments: self.comments + other.comments,
        }
    }
}

/// A content item whose observed momentum outpaces its predictive score.
///
/// Produced only by the detector; every instance satisfies
/// `anomaly_ratio >= anomaly_threshold` and `weighted_engagement >= min_engagement`
/// for the configuration it was detected under.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MomentumAnomaly {
    pub content_id: String,
    pub author_id: String,
    pub author_handle: String,
    pub body_text: String,
    pub caption_text: Option<String>,
    pub hashtags: Vec<String>,
    pub region: Option<String>,

    /// Pre-existing cultural-fit score (always > 0).
    pub predictive_score: f64,
    pub momentum_score: f64,
    /// `momentum_score / predictive_score`.
    pub anomaly_ratio: f64,

    #[serde(flatten)]
    pub engagement: EngagementCounts,
    pub weighted_engagement: f64,

    pub has_media: bool,
    /// Hours between creation and detection time, never negative.
    pub age_hours: f64,
    pub created_at: DateTime<Utc>,
}

impl MomentumAnomaly {
    /// Body and caption joined by a single space (caption omitted when absent).
    pub fn text(&self) -> String {
        format!(
            "{} {}",
            self.body_text,
            self.caption_text.as_deref().unwrap_or("")
        )
    }

    /// Whether the anomaly carries `tag`, compared after hashtag normalization.
    pub fn has_hashtag(&self, tag: &str) -> bool {
        let wanted = normalize_hashtag(tag);
        self.hashtags.iter().any(|h| normalize_hashtag(h) == wanted)
    }
}

/// Lower-cases a hashtag and strips its leading `#`.
pub fn normalize_hashtag(tag: &str) -> String {
    tag.trim().trim_start_matches('#').to_lowercase()
}
