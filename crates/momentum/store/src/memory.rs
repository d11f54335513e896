//! In-memory reference implementation of the candidate repository.
//!
//! Deterministic and test-friendly. Production deployments should read from the
//! transactional store (see the `postgres` feature).

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use momentum_types::DetectionWindow;
use tracing::debug;

use crate::model::RawCandidate;
use crate::traits::CandidateRepository;
use crate::{StoreError, StoreResult};

#[derive(Default)]
pub struct InMemoryCandidateStore {
    rows: RwLock<Vec<RawCandidate>>,
}

impl InMemoryCandidateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_candidates(rows: Vec<RawCandidate>) -> Self {
        Self {
            rows: RwLock::new(rows),
        }
    }

    /// Insert or replace a row by id.
    pub fn upsert(&self, candidate: RawCandidate) -> StoreResult<()> {
        if candidate.id.is_empty() {
            return Err(StoreError::InvalidInput("candidate id must not be empty".into()));
        }
        let mut guard = self
            .rows
            .write()
            .map_err(|_| StoreError::Unavailable("candidate lock poisoned".into()))?;
        match guard.iter_mut().find(|c| c.id == candidate.id) {
            Some(existing) => *existing = candidate,
            None => guard.push(candidate),
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rows.read().map(|g| g.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CandidateRepository for InMemoryCandidateStore {
    async fn fetch_candidates(&self, window: &DetectionWindow) -> StoreResult<Vec<RawCandidate>> {
        let now = Utc::now();
        let guard = self
            .rows
            .read()
            .map_err(|_| StoreError::Unavailable("candidate lock poisoned".into()))?;
        let rows: Vec<RawCandidate> = guard
            .iter()
            .filter(|c| c.is_eligible() && window.contains(c.created_at, now))
            .cloned()
            .collect();
        debug!(
            stored = guard.len(),
            returned = rows.len(),
            window_days = window.days,
            "fetched candidates"
        );
        Ok(rows)
    }
}
