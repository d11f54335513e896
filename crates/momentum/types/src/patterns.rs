//! Statistical/linguistic fingerprint of an anomaly set.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Coarse sentence-length classification of the aggregated corpus.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentenceStyle {
    Short,
    #[default]
    Medium,
    Long,
}

impl SentenceStyle {
    /// `short` below 15 words per item, `medium` below 30, else `long`.
    pub fn from_average_words(avg_words: f64) -> Self {
        if avg_words < 15.0 {
            Self::Short
        } else if avg_words < 30.0 {
            Self::Medium
        } else {
            Self::Long
        }
    }
}

/// Categorical flags summarizing notable aggregate properties.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CultureSignal {
    HighJoualDensity,
    MajorCityConcentration,
    HighEnthusiasm,
    ConversationalStyle,
}

impl std::fmt::Display for CultureSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HighJoualDensity => write!(f, "HIGH_JOUAL_DENSITY"),
            Self::MajorCityConcentration => write!(f, "MAJOR_CITY_CONCENTRATION"),
            Self::HighEnthusiasm => write!(f, "HIGH_ENTHUSIASM"),
            Self::ConversationalStyle => write!(f, "CONVERSATIONAL_STYLE"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionCount {
    pub region: String,
    pub count: usize,
}

/// Snapshot derived from a set of anomalies.
///
/// [`PatternAnalysis::empty`] is the canonical value for an empty anomaly set.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PatternAnalysis {
    // Linguistic
    pub known_markers: BTreeSet<String>,
    /// Marker hits per 100 characters of aggregated text.
    pub joual_density: f64,
    pub average_word_length: f64,
    pub sentence_style: SentenceStyle,
    pub question_count: usize,
    pub exclamation_count: usize,

    // Content
    /// At most 10, descending by count.
    pub top_hashtags: Vec<TagCount>,
    /// At most 5, descending by count.
    pub top_regions: Vec<RegionCount>,
    pub content_length_avg: usize,
    pub has_media: bool,

    // Temporal
    /// At most 3 hours of day (0-23), most frequent first.
    pub peak_posting_hours: Vec<u32>,
    pub avg_age_at_peak: f64,

    // Culture
    pub culture_signals: BTreeSet<CultureSignal>,
    /// Heuristic markers that are not in the known dictionary.
    pub emerging_terms: Vec<String>,
}

impl PatternAnalysis {
    /// All numeric fields zero, all collections empty, `sentence_style = medium`.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn has_signal(&self, signal: CultureSignal) -> bool {
        self.culture_signals.contains(&signal)
    }
}
