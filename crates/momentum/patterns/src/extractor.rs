use std::collections::{BTreeSet, HashMap};

use chrono::{FixedOffset, Offset, Timelike, Utc};
use momentum_types::{
    normalize_hashtag, CultureSignal, MomentumAnomaly, PatternAnalysis, RegionCount, SentenceStyle,
    TagCount,
};
use tracing::debug;

use crate::heuristic::{DialectMorphologyHeuristic, TermHeuristic};
use crate::lexicon::{is_known_marker, is_major_city, KNOWN_MARKERS};

const MAX_HASHTAGS: usize = 10;
const MAX_REGIONS: usize = 5;
const MAX_PEAK_HOURS: usize = 3;

/// Reduces an anomaly set to a reusable [`PatternAnalysis`].
///
/// Stateless apart from its configuration; `analyze` is a pure function of
/// its input.
pub struct PatternExtractor {
    heuristic: Box<dyn TermHeuristic>,
    posting_offset: FixedOffset,
}

impl PatternExtractor {
    pub fn new() -> Self {
        Self {
            heuristic: Box::new(DialectMorphologyHeuristic::new()),
            posting_offset: Utc.fix(),
        }
    }

    /// Replace the candidate-term heuristic.
    pub fn with_heuristic(mut self, heuristic: Box<dyn TermHeuristic>) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// Offset used to bucket `created_at` into hours of day.
    pub fn with_posting_offset(mut self, offset: FixedOffset) -> Self {
        self.posting_offset = offset;
        self
    }

    pub fn heuristic_name(&self) -> &str {
        self.heuristic.name()
    }

    pub fn analyze(&self, anomalies: &[MomentumAnomaly]) -> PatternAnalysis {
        if anomalies.is_empty() {
            return PatternAnalysis::empty();
        }
        let n = anomalies.len() as f64;

        let corpus = build_corpus(anomalies);
        let corpus_chars = corpus.chars().count();

        // ── Markers ─────────────────────────────────────────────────────
        let known_markers: BTreeSet<String> = KNOWN_MARKERS
            .iter()
            .filter(|m| corpus.contains(*m))
            .map(|m| m.to_string())
            .collect();
        let emerging_terms = self.emerging_terms(&corpus);
        let marker_hits = known_markers.len() + emerging_terms.len();
        let joual_density = marker_hits as f64 / corpus_chars.max(1) as f64 * 100.0;

        // ── Corpus statistics ───────────────────────────────────────────
        let words: Vec<&str> = corpus.split_whitespace().collect();
        let average_word_length = if words.is_empty() {
            0.0
        } else {
            words.iter().map(|w| w.chars().count()).sum::<usize>() as f64 / words.len() as f64
        };
        let sentence_style = SentenceStyle::from_average_words(words.len() as f64 / n);
        let question_count = corpus.matches('?').count();
        let exclamation_count = corpus.matches('!').count();

        // ── Content ─────────────────────────────────────────────────────
        let top_hashtags = top_counts(
            anomalies
                .iter()
                .flat_map(|a| a.hashtags.iter())
                .map(|t| normalize_hashtag(t))
                .filter(|t| !t.is_empty()),
            MAX_HASHTAGS,
        )
        .into_iter()
        .map(|(tag, count)| TagCount { tag, count })
        .collect::<Vec<_>>();

        let top_regions = top_counts(
            anomalies
                .iter()
                .filter_map(|a| a.region.as_deref())
                .filter(|r| !r.trim().is_empty())
                .map(str::to_string),
            MAX_REGIONS,
        )
        .into_iter()
        .map(|(region, count)| RegionCount { region, count })
        .collect::<Vec<_>>();

        let total_body_chars: usize = anomalies.iter().map(|a| a.body_text.chars().count()).sum();
        let content_length_avg = (total_body_chars as f64 / n).round() as usize;
        let has_media = anomalies.iter().any(|a| a.has_media);

        // ── Temporal ────────────────────────────────────────────────────
        let peak_posting_hours = self.peak_hours(anomalies);
        let mean_age = anomalies.iter().map(|a| a.age_hours).sum::<f64>() / n;
        let avg_age_at_peak = (mean_age * 10.0).round() / 10.0;

        // ── Culture ─────────────────────────────────────────────────────
        let mut culture_signals = BTreeSet::new();
        if marker_hits as f64 > 0.5 * n {
            culture_signals.insert(CultureSignal::HighJoualDensity);
        }
        if top_regions.iter().any(|r| is_major_city(&r.region)) {
            culture_signals.insert(CultureSignal::MajorCityConcentration);
        }
        if exclamation_count as f64 > 2.0 * n {
            culture_signals.insert(CultureSignal::HighEnthusiasm);
        }
        if question_count as f64 > n {
            culture_signals.insert(CultureSignal::ConversationalStyle);
        }

        debug!(
            anomalies = anomalies.len(),
            known_markers = known_markers.len(),
            emerging_terms = emerging_terms.len(),
            signals = culture_signals.len(),
            heuristic = self.heuristic.name(),
            "extracted patterns"
        );

        PatternAnalysis {
            known_markers,
            joual_density,
            average_word_length,
            sentence_style,
            question_count,
            exclamation_count,
            top_hashtags,
            top_regions,
            content_length_avg,
            has_media,
            peak_posting_hours,
            avg_age_at_peak,
            culture_signals,
            emerging_terms,
        }
    }

    /// Heuristic hits that are not dictionary markers, deduplicated in order of
    /// first appearance.
    fn emerging_terms(&self, corpus: &str) -> Vec<String> {
        let mut seen = BTreeSet::new();
        let mut terms = Vec::new();
        for raw in corpus.split_whitespace() {
            let token = trim_token(raw);
            if token.is_empty() || is_known_marker(token) || !self.heuristic.is_candidate(token) {
                continue;
            }
            if seen.insert(token.to_string()) {
                terms.push(token.to_string());
            }
        }
        terms
    }

    /// Up to three hours of day, most frequent first, ties to the lower hour.
    fn peak_hours(&self, anomalies: &[MomentumAnomaly]) -> Vec<u32> {
        let mut buckets = [0usize; 24];
        for a in anomalies {
            let hour = a.created_at.with_timezone(&self.posting_offset).hour();
            buckets[hour as usize] += 1;
        }
        let mut hours: Vec<u32> = (0..24u32).filter(|h| buckets[*h as usize] > 0).collect();
        hours.sort_by(|a, b| {
            buckets[*b as usize]
                .cmp(&buckets[*a as usize])
                .then(a.cmp(b))
        });
        hours.truncate(MAX_PEAK_HOURS);
        hours
    }
}

impl Default for PatternExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PatternExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternExtractor")
            .field("heuristic", &self.heuristic.name())
            .field("posting_offset", &self.posting_offset)
            .finish()
    }
}

/// Body + caption of every anomaly, space-joined and case-folded. The
/// typographic apostrophe is folded to `'`.
fn build_corpus(anomalies: &[MomentumAnomaly]) -> String {
    anomalies
        .iter()
        .map(MomentumAnomaly::text)
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
        .replace('\u{2019}', "'")
}

fn trim_token(raw: &str) -> &str {
    raw.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
}

/// Tally in first-seen order, then stable-sort by count so ties keep that order.
fn top_counts(items: impl Iterator<Item = String>, limit: usize) -> Vec<(String, usize)> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();
    for item in items {
        match index.get(&item) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(item.clone(), counts.len());
                counts.push((item, 1));
            }
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(limit);
    counts
}
