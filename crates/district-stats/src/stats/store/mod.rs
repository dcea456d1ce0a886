//! Read/upsert contract consumed from the persistence layer.

mod memory;

pub use memory::InMemoryDistrictStore;

use super::aggregate::{StateAverage, StateOverview, TopPerformer};
use super::record::DistrictRecord;
use async_trait::async_trait;

/// Storage abstraction so the orchestrator can run against any backend.
///
/// `ping` is the liveness probe used for source selection; it says nothing about
/// whether a particular state has data.
#[async_trait]
pub trait DistrictStore: Send + Sync {
    async fn ping(&self) -> Result<(), StoreError>;
    async fn distinct_districts(&self, state_name: &str) -> Result<Vec<String>, StoreError>;
    async fn distinct_states(&self) -> Result<Vec<String>, StoreError>;
    /// Most recently updated record for the district in `financial_year`.
    async fn find_current_record(
        &self,
        state_name: &str,
        district_name: &str,
        financial_year: &str,
    ) -> Result<Option<DistrictRecord>, StoreError>;
    /// Newest months first.
    async fn find_recent_records(
        &self,
        state_name: &str,
        district_name: &str,
        limit: usize,
    ) -> Result<Vec<DistrictRecord>, StoreError>;
    async fn aggregate_state_average(
        &self,
        state_name: &str,
        financial_year: &str,
    ) -> Result<Option<StateAverage>, StoreError>;
    /// `None` when the state has no records for the year.
    async fn aggregate_state_overview(
        &self,
        state_name: &str,
        financial_year: &str,
    ) -> Result<Option<StateOverview>, StoreError>;
    async fn top_districts_by_days(
        &self,
        state_name: &str,
        financial_year: &str,
        limit: usize,
    ) -> Result<Vec<TopPerformer>, StoreError>;
    /// Inserts or replaces by (state, district, financial year, month).
    async fn upsert_record(&self, record: DistrictRecord) -> Result<UpsertOutcome, StoreError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("store query failed: {0}")]
    Query(String),
}

impl StoreError {
    /// Whether the failure means the store should be treated as unreachable.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}
