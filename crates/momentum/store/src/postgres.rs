//! PostgreSQL adapter for the candidate repository.
//!
//! Reads `publications` joined to `user_profiles`. The eligibility rules are
//! pushed into SQL so the engine receives exactly the rows it may score.
//!
//! `publications.created_at` is `TIMESTAMP` (no zone) holding UTC wall time.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use momentum_types::{DetectionWindow, EngagementCounts};
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;
use tracing::debug;

use crate::model::RawCandidate;
use crate::traits::CandidateRepository;
use crate::{StoreError, StoreResult};

const CANDIDATE_QUERY: &str = r#"
    SELECT
        p.id::TEXT AS id,
        p.user_id::TEXT AS user_id,
        u.username AS username,
        COALESCE(p.content, '') AS content,
        p.caption AS caption,
        COALESCE(p.hashtags, ARRAY[]::TEXT[]) AS hashtags,
        p.region AS region,
        p.quebec_score::FLOAT8 AS quebec_score,
        COALESCE(p.reactions_count, 0)::INT8 AS fires,
        COALESCE(p.shares_count, 0)::INT8 AS shares,
        COALESCE(p.piasse_count, 0)::INT8 AS tips,
        COALESCE(p.comments_count, 0)::INT8 AS comments,
        (p.media_url IS NOT NULL) AS has_media,
        p.created_at AS created_at
    FROM publications p
    JOIN user_profiles u ON p.user_id = u.id
    WHERE p.quebec_score IS NOT NULL
      AND p.quebec_score > 0
      AND (p.est_masque = false OR p.est_masque IS NULL)
      AND p.deleted_at IS NULL
      AND p.created_at > (NOW() AT TIME ZONE 'UTC') - make_interval(days => $1)
"#;

/// PostgreSQL-backed candidate repository.
#[derive(Clone)]
pub struct PostgresCandidateStore {
    pool: PgPool,
}

impl PostgresCandidateStore {
    pub async fn connect(database_url: &str) -> StoreResult<Self> {
        Self::connect_with_options(database_url, 10, 5).await
    }

    /// Connect with explicit pool parameters.
    pub async fn connect_with_options(
        database_url: &str,
        max_connections: u32,
        connect_timeout_secs: u64,
    ) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(std::time::Duration::from_secs(connect_timeout_secs))
            .connect(database_url)
            .await
            .map_err(|e| StoreError::Unavailable(format!("failed to connect postgres: {e}")))?;
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl CandidateRepository for PostgresCandidateStore {
    async fn fetch_candidates(&self, window: &DetectionWindow) -> StoreResult<Vec<RawCandidate>> {
        let days = i32::try_from(window.days)
            .map_err(|_| StoreError::InvalidInput(format!("window too large: {} days", window.days)))?;
        let rows = sqlx::query(CANDIDATE_QUERY)
            .bind(days)
            .fetch_all(&self.pool)
            .await
            .map_err(map_query_error)?;
        let candidates = rows.iter().map(decode_row).collect::<StoreResult<Vec<_>>>()?;
        debug!(rows = candidates.len(), window_days = window.days, "fetched candidates from postgres");
        Ok(candidates)
    }
}

fn map_query_error(e: sqlx::Error) -> StoreError {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            StoreError::Unavailable(e.to_string())
        }
        other => StoreError::Query(other.to_string()),
    }
}

fn decode_row(row: &PgRow) -> StoreResult<RawCandidate> {
    let counter = |column: &str| -> StoreResult<u64> {
        let value: i64 = get(row, column)?;
        Ok(u64::try_from(value).unwrap_or(0))
    };
    Ok(RawCandidate {
        id: get(row, "id")?,
        author_id: get(row, "user_id")?,
        author_handle: get(row, "username")?,
        body: get(row, "content")?,
        caption: get(row, "caption")?,
        hashtags: get(row, "hashtags")?,
        region: get(row, "region")?,
        predictive_score: get(row, "quebec_score")?,
        engagement: EngagementCounts::new(
            counter("fires")?,
            counter("shares")?,
            counter("tips")?,
            counter("comments")?,
        ),
        has_media: get(row, "has_media")?,
        created_at: created_at_utc(get::<CreatedAtColumn>(row, "created_at")?),
        hidden: false,
        deleted: false,
    })
}

/// Rust type matching the `publications.created_at` column.
type CreatedAtColumn = NaiveDateTime;

fn created_at_utc(stored: CreatedAtColumn) -> DateTime<Utc> {
    stored.and_utc()
}

fn get<'r, T>(row: &'r PgRow, column: &str) -> StoreResult<T>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(column)
        .map_err(|e| StoreError::Decode(format!("{column}: {e}")))
}
