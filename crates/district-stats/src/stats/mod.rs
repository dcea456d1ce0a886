//! Query-time data availability for district statistics.
//!
//! Every query flows through [`DistrictStatsService`]: the TTL cache is consulted first,
//! then the persistent store if it answers a liveness probe in time, and otherwise the
//! deterministic fallback dataset. Aggregates and geographic lookups are pure functions
//! over [`DistrictRecord`]s and the static district catalog.

pub mod aggregate;
pub mod cache;
pub mod catalog;
pub mod fallback;
pub mod locator;
pub mod orchestrator;
pub mod record;
pub mod router;
pub mod seed;
pub mod store;

pub use aggregate::{
    completion_rate, district_vs_state_comparison, employment_rate, state_average,
    state_overview, top_performers, DistrictComparison, DistrictSummary, StateAverage,
    StateOverview, TopPerformer,
};
pub use cache::TtlCache;
pub use catalog::{DistrictLocation, SUPPORTED_STATES};
pub use fallback::{transform, FallbackGenerator, RawDistrictRow};
pub use locator::{ConfidenceBand, LocateError, NearestDistrict, NearestDistrictLocator};
pub use orchestrator::{
    CacheKey, DistrictDetail, DistrictStatsService, QueryError, ResponseSource, Sourced,
    StateReport, DEFAULT_STATE,
};
pub use record::{DataSource, DistrictRecord, RecordKey, ReportingPeriod};
pub use router::district_router;
pub use seed::{seed_fallback_dataset, SeedReport, StateSeedSummary};
pub use store::{DistrictStore, InMemoryDistrictStore, StoreError, UpsertOutcome};
