//! District employment-programme statistics: the data-availability layer that answers
//! every query from the TTL cache, the persistent store, or the deterministic fallback
//! dataset, plus the aggregation and geographic lookups computed on top of it.

pub mod config;
pub mod error;
pub mod stats;
pub mod telemetry;
