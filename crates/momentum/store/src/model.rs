use chrono::{DateTime, Utc};
use momentum_types::EngagementCounts;
use serde::{Deserialize, Serialize};

/// One content + engagement row as returned by a repository.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawCandidate {
    pub id: String,
    pub author_id: String,
    pub author_handle: String,
    pub body: String,
    pub caption: Option<String>,
    #[serde(default)]
    pub hashtags: Vec<String>,
    pub region: Option<String>,
    pub predictive_score: f64,
    #[serde(flatten)]
    pub engagement: EngagementCounts,
    #[serde(default)]
    pub has_media: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub deleted: bool,
}

impl RawCandidate {
    /// Minimal visible candidate; counters start at zero.
    pub fn new(
        id: impl Into<String>,
        author_handle: impl Into<String>,
        body: impl Into<String>,
        predictive_score: f64,
        created_at: DateTime<Utc>,
    ) -> Self {
        let author_handle = author_handle.into();
        Self {
            id: id.into(),
            author_id: format!("user-{author_handle}"),
            author_handle,
            body: body.into(),
            caption: None,
            hashtags: Vec::new(),
            region: None,
            predictive_score,
            engagement: EngagementCounts::default(),
            has_media: false,
            created_at,
            hidden: false,
            deleted: false,
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn with_hashtags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hashtags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_engagement(mut self, engagement: EngagementCounts) -> Self {
        self.engagement = engagement;
        self
    }

    pub fn with_media(mut self) -> Self {
        self.has_media = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn deleted(mut self) -> Self {
        self.deleted = true;
        self
    }

    /// Positive score, visible, not deleted.
    pub fn is_eligible(&self) -> bool {
        self.predictive_score > 0.0 && !self.hidden && !self.deleted
    }
}
