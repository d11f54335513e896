//! Candidate repository for momentum evolution.
//!
//! The engine reads content + engagement rows through one narrow contract,
//! [`CandidateRepository::fetch_candidates`]. Adapters are responsible for the
//! eligibility rules (positive predictive score, visible, not deleted, inside the
//! window); the engine never re-filters them.
//!
//! - [`memory::InMemoryCandidateStore`]: deterministic, test-friendly.
//! - `postgres::PostgresCandidateStore` (feature `postgres`): reads the
//!   publications table with the eligibility rules pushed into SQL.

#![deny(unsafe_code)]
#![warn(rust_2018_idioms)]

mod error;
pub mod memory;
mod model;
#[cfg(feature = "postgres")]
pub mod postgres;
mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryCandidateStore;
pub use model::RawCandidate;
pub use traits::CandidateRepository;
