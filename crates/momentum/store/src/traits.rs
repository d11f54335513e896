use async_trait::async_trait;
use momentum_types::DetectionWindow;

use crate::model::RawCandidate;
use crate::StoreResult;

/// Read-only source of scoring candidates.
///
/// Implementations must return only records that have a predictive score
/// strictly greater than zero, are neither hidden nor deleted, and were created
/// inside `window`. Order is unspecified.
#[async_trait]
pub trait CandidateRepository: Send + Sync {
    async fn fetch_candidates(&self, window: &DetectionWindow) -> StoreResult<Vec<RawCandidate>>;
}

#[async_trait]
impl<T: CandidateRepository + ?Sized> CandidateRepository for std::sync::Arc<T> {
    async fn fetch_candidates(&self, window: &DetectionWindow) -> StoreResult<Vec<RawCandidate>> {
        (**self).fetch_candidates(window).await
    }
}
