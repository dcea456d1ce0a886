//! Per-query source selection: cache, then store, then fallback.
//!
//! Each query runs the same sequence:
//!
//! ```text
//! CHECK_CACHE --hit--> RETURN (source = cache)
//!      |
//!    miss
//!      v
//! SELECT_SOURCE --store answers ping--> QUERY_STORE --+--> COMPUTE --> POPULATE_CACHE --> RETURN
//!      |                                   | unreachable / timed out  |
//!      |                                   | or no data for a listing |
//!      +--store unreachable--> RUN_FALLBACK <-----------------------+
//! ```
//!
//! A store that is reachable but lacks a specific district is a final `NotFound`; only
//! the state-wide listings and the overview treat "no data" as a reason to fall back.

mod error;
mod keys;
mod views;

#[cfg(test)]
mod tests;

pub use error::QueryError;
pub use keys::CacheKey;
pub use views::{DistrictDetail, ResponseSource, Sourced, StateReport};

use views::CachedPayload;

use super::aggregate::{
    district_vs_state_comparison, state_average, state_overview, top_performers,
    DistrictSummary, DEFAULT_TOP_PERFORMERS,
};
use super::cache::TtlCache;
use super::catalog::{DistrictLocation, SUPPORTED_STATES};
use super::fallback::FallbackGenerator;
use super::locator::{validate_coordinate, NearestDistrict, NearestDistrictLocator};
use super::record::{normalize_name, ReportingPeriod};
use super::store::{DistrictStore, StoreError};
use chrono::NaiveDate;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_STATE: &str = "GUJARAT";
const HISTORY_LIMIT: usize = 6;
/// Steps per degree for nearest-district lookups: three decimal places.
const COORDINATE_GRID: f64 = 1_000.0;

/// Why the store path could not produce an answer.
enum StorePath {
    Unreachable(String),
    NoData,
    Failed(QueryError),
}

impl From<QueryError> for StorePath {
    fn from(value: QueryError) -> Self {
        Self::Failed(value)
    }
}

/// Orchestrates every logical query over an injected cache and store.
pub struct DistrictStatsService<S> {
    store: Arc<S>,
    cache: Arc<TtlCache<CachedPayload>>,
    generator: FallbackGenerator,
    locator: NearestDistrictLocator,
    store_timeout: Duration,
    reporting_date: Option<NaiveDate>,
    expose_internal_errors: bool,
}

impl<S> DistrictStatsService<S>
where
    S: DistrictStore + 'static,
{
    /// `cache_ttl` sizes the cache created for this service instance; it lives as long
    /// as the service and is not persisted.
    pub fn new(store: Arc<S>, cache_ttl: Duration, store_timeout: Duration) -> Self {
        Self {
            store,
            cache: Arc::new(TtlCache::new(cache_ttl)),
            generator: FallbackGenerator::new(),
            locator: NearestDistrictLocator::standard(),
            store_timeout,
            reporting_date: None,
            expose_internal_errors: false,
        }
    }

    /// Pins the reporting period instead of following the wall clock.
    pub fn with_reporting_date(mut self, date: NaiveDate) -> Self {
        self.reporting_date = Some(date);
        self
    }

    pub fn with_internal_error_details(mut self, expose: bool) -> Self {
        self.expose_internal_errors = expose;
        self
    }

    pub fn exposes_internal_errors(&self) -> bool {
        self.expose_internal_errors
    }

    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }

    pub fn reporting_period(&self) -> ReportingPeriod {
        self.reporting_date
            .map(ReportingPeriod::from_date)
            .unwrap_or_else(ReportingPeriod::current)
    }

    /// District names of a state.
    pub async fn list_districts(&self, state: &str) -> Result<Sourced<Vec<String>>, QueryError> {
        let state = required_name("state", state)?;
        let key = CacheKey::Districts {
            state: state.clone(),
        };
        if let Some(CachedPayload::Names(names)) = self.cached(&key) {
            return Ok(Sourced::new(ResponseSource::Cache, names));
        }

        let from_store = if self.store_is_reachable().await {
            match self.guarded("distinct_districts", self.store.distinct_districts(&state)).await {
                Ok(names) if !names.is_empty() => Ok(names),
                Ok(_) => Err(StorePath::NoData),
                Err(path) => Err(path),
            }
        } else {
            Err(StorePath::Unreachable("ping failed".to_string()))
        };

        let (source, names) = match from_store {
            Ok(names) => (ResponseSource::Database, names),
            Err(path) => {
                self.note_fallback(&key, path)?;
                (ResponseSource::Fallback, self.generator.district_names(&state))
            }
        };

        self.cache.set(key.to_string(), CachedPayload::Names(names.clone()));
        Ok(Sourced::new(source, names))
    }

    /// Every state with data.
    pub async fn list_states(&self) -> Result<Sourced<Vec<String>>, QueryError> {
        let key = CacheKey::States;
        if let Some(CachedPayload::Names(names)) = self.cached(&key) {
            return Ok(Sourced::new(ResponseSource::Cache, names));
        }

        let from_store = if self.store_is_reachable().await {
            match self.guarded("distinct_states", self.store.distinct_states()).await {
                Ok(names) if !names.is_empty() => Ok(names),
                Ok(_) => Err(StorePath::NoData),
                Err(path) => Err(path),
            }
        } else {
            Err(StorePath::Unreachable("ping failed".to_string()))
        };

        let (source, names) = match from_store {
            Ok(names) => (ResponseSource::Database, names),
            Err(path) => {
                self.note_fallback(&key, path)?;
                let names = SUPPORTED_STATES.iter().map(|s| s.to_string()).collect();
                (ResponseSource::Fallback, names)
            }
        };

        self.cache.set(key.to_string(), CachedPayload::Names(names.clone()));
        Ok(Sourced::new(source, names))
    }

    /// Current record, recent history and comparison against the state average.
    pub async fn district_detail(
        &self,
        district: &str,
        state: &str,
        year: Option<&str>,
    ) -> Result<Sourced<DistrictDetail>, QueryError> {
        let district = required_name("district", district)?;
        let state = required_name("state", state)?;
        let period = self.reporting_period();
        let year = financial_year(year, &period)?;
        let key = CacheKey::DistrictDetail {
            state: state.clone(),
            district: district.clone(),
            year: year.clone(),
        };
        if let Some(CachedPayload::Detail(detail)) = self.cached(&key) {
            return Ok(Sourced::new(ResponseSource::Cache, detail));
        }

        let from_store = if self.store_is_reachable().await {
            self.detail_from_store(&state, &district, &year).await
        } else {
            Err(StorePath::Unreachable("ping failed".to_string()))
        };

        let (source, detail) = match from_store {
            Ok(detail) => (ResponseSource::Database, detail),
            Err(path) => {
                self.note_fallback(&key, path)?;
                let detail = self.detail_from_fallback(&state, &district, &period)?;
                (ResponseSource::Fallback, detail)
            }
        };

        self.cache.set(key.to_string(), CachedPayload::Detail(detail.clone()));
        Ok(Sourced::new(source, detail))
    }

    /// Plain-language figures for one district.
    pub async fn district_summary(
        &self,
        district: &str,
        state: &str,
        year: Option<&str>,
    ) -> Result<Sourced<DistrictSummary>, QueryError> {
        let district = required_name("district", district)?;
        let state = required_name("state", state)?;
        let period = self.reporting_period();
        let year = financial_year(year, &period)?;
        let key = CacheKey::DistrictSummary {
            state: state.clone(),
            district: district.clone(),
            year: year.clone(),
        };
        if let Some(CachedPayload::Summary(summary)) = self.cached(&key) {
            return Ok(Sourced::new(ResponseSource::Cache, summary));
        }

        let from_store = if self.store_is_reachable().await {
            self.guarded(
                "find_current_record",
                self.store.find_current_record(&state, &district, &year),
            )
            .await
            .and_then(|record| {
                record
                    .map(|record| DistrictSummary::from(&record))
                    .ok_or_else(|| StorePath::Failed(not_found(&state, &district)))
            })
        } else {
            Err(StorePath::Unreachable("ping failed".to_string()))
        };

        let (source, summary) = match from_store {
            Ok(summary) => (ResponseSource::Database, summary),
            Err(path) => {
                self.note_fallback(&key, path)?;
                let record = self
                    .generator
                    .district_record(&state, &district, &period)
                    .ok_or_else(|| not_found(&state, &district))?;
                (ResponseSource::Fallback, DistrictSummary::from(&record))
            }
        };

        self.cache.set(key.to_string(), CachedPayload::Summary(summary.clone()));
        Ok(Sourced::new(source, summary))
    }

    /// State-wide sums plus the best districts by days of work per household.
    pub async fn state_overview(
        &self,
        state: &str,
        year: Option<&str>,
    ) -> Result<Sourced<StateReport>, QueryError> {
        let state = required_name("state", state)?;
        let period = self.reporting_period();
        let year = financial_year(year, &period)?;
        let key = CacheKey::StateOverview {
            state: state.clone(),
            year: year.clone(),
        };
        if let Some(CachedPayload::Report(report)) = self.cached(&key) {
            return Ok(Sourced::new(ResponseSource::Cache, report));
        }

        let from_store = if self.store_is_reachable().await {
            self.overview_from_store(&state, &year).await
        } else {
            Err(StorePath::Unreachable("ping failed".to_string()))
        };

        let (source, report) = match from_store {
            Ok(report) => (ResponseSource::Database, report),
            Err(path) => {
                self.note_fallback(&key, path)?;
                let records = self.generator.records(&state, &period);
                let report = StateReport {
                    overview: state_overview(&records),
                    top_performers: top_performers(&records, DEFAULT_TOP_PERFORMERS),
                };
                (ResponseSource::Fallback, report)
            }
        };

        self.cache.set(key.to_string(), CachedPayload::Report(report.clone()));
        Ok(Sourced::new(source, report))
    }

    /// Closest known district to a coordinate. Answered from the bundled reference
    /// table, so a fresh result is tagged `fallback`.
    ///
    /// Coordinates are snapped to a ~110 m grid before lookup and caching, so nearby
    /// requests share one cache entry and a cached answer equals a fresh one.
    pub fn nearest_district(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Sourced<NearestDistrict>, QueryError> {
        validate_coordinate(latitude, longitude)?;
        let (latitude, longitude) = (snap_to_grid(latitude), snap_to_grid(longitude));
        let key = CacheKey::Nearest {
            latitude,
            longitude,
        };
        if let Some(CachedPayload::Nearest(nearest)) = self.cached(&key) {
            return Ok(Sourced::new(ResponseSource::Cache, nearest));
        }

        let nearest = self.locator.locate(latitude, longitude)?;
        debug!(
            district = %nearest.district,
            confidence = nearest.confidence.label(),
            "located nearest district"
        );

        self.cache.set(key.to_string(), CachedPayload::Nearest(nearest.clone()));
        Ok(Sourced::new(ResponseSource::Fallback, nearest))
    }

    /// Every district coordinate in the reference table.
    pub fn districts_map(&self) -> Sourced<Vec<DistrictLocation>> {
        let key = CacheKey::DistrictsMap;
        if let Some(CachedPayload::Locations(locations)) = self.cached(&key) {
            return Sourced::new(ResponseSource::Cache, locations);
        }

        let locations = self.locator.locations().to_vec();
        self.cache.set(key.to_string(), CachedPayload::Locations(locations.clone()));
        Sourced::new(ResponseSource::Fallback, locations)
    }

    fn cached(&self, key: &CacheKey) -> Option<CachedPayload> {
        let hit = self.cache.get(&key.to_string());
        if hit.is_some() {
            debug!(%key, "cache hit");
        } else {
            debug!(%key, "cache miss");
        }
        hit
    }

    /// Liveness probe bounded by the store timeout.
    async fn store_is_reachable(&self) -> bool {
        match self.guarded("ping", self.store.ping()).await {
            Ok(()) => true,
            Err(StorePath::Unreachable(reason)) => {
                warn!(%reason, "persistent store unreachable, using fallback data");
                false
            }
            Err(StorePath::Failed(err)) => {
                warn!(error = %err, "store ping failed, using fallback data");
                false
            }
            Err(StorePath::NoData) => false,
        }
    }

    async fn guarded<T, F>(&self, operation: &'static str, call: F) -> Result<T, StorePath>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        match tokio::time::timeout(self.store_timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) if err.is_unavailable() => Err(StorePath::Unreachable(err.to_string())),
            Ok(Err(err)) => Err(StorePath::Failed(QueryError::Store(err))),
            Err(_) => Err(StorePath::Unreachable(format!(
                "{operation} exceeded {}ms",
                self.store_timeout.as_millis()
            ))),
        }
    }

    /// Logs the reason for falling back, or surfaces it if it is a real failure.
    fn note_fallback(&self, key: &CacheKey, path: StorePath) -> Result<(), QueryError> {
        match path {
            StorePath::Unreachable(reason) => {
                warn!(%key, %reason, "store path abandoned, serving fallback data");
                Ok(())
            }
            StorePath::NoData => {
                info!(%key, "store has no data for query, serving fallback data");
                Ok(())
            }
            StorePath::Failed(err) => Err(err),
        }
    }

    async fn detail_from_store(
        &self,
        state: &str,
        district: &str,
        year: &str,
    ) -> Result<DistrictDetail, StorePath> {
        let current = self
            .guarded(
                "find_current_record",
                self.store.find_current_record(state, district, year),
            )
            .await?
            .ok_or_else(|| not_found(state, district))?;
        let historical = self
            .guarded(
                "find_recent_records",
                self.store.find_recent_records(state, district, HISTORY_LIMIT),
            )
            .await?;
        let state_average = self
            .guarded(
                "aggregate_state_average",
                self.store.aggregate_state_average(state, year),
            )
            .await?;

        let comparison = district_vs_state_comparison(&current, state_average.as_ref());
        Ok(DistrictDetail {
            current,
            historical,
            state_average,
            comparison,
        })
    }

    fn detail_from_fallback(
        &self,
        state: &str,
        district: &str,
        period: &ReportingPeriod,
    ) -> Result<DistrictDetail, QueryError> {
        let records = self.generator.records(state, period);
        let historical: Vec<_> = period
            .trailing(HISTORY_LIMIT)
            .iter()
            .filter_map(|month| self.generator.district_record(state, district, month))
            .collect();
        let current = historical
            .first()
            .cloned()
            .ok_or_else(|| not_found(state, district))?;
        let state_average = state_average(&records);
        let comparison = district_vs_state_comparison(&current, state_average.as_ref());

        Ok(DistrictDetail {
            current,
            historical,
            state_average,
            comparison,
        })
    }

    async fn overview_from_store(&self, state: &str, year: &str) -> Result<StateReport, StorePath> {
        let overview = self
            .guarded(
                "aggregate_state_overview",
                self.store.aggregate_state_overview(state, year),
            )
            .await?
            .ok_or(StorePath::NoData)?;
        let top_performers = self
            .guarded(
                "top_districts_by_days",
                self.store.top_districts_by_days(state, year, DEFAULT_TOP_PERFORMERS),
            )
            .await?;

        Ok(StateReport {
            overview,
            top_performers,
        })
    }
}

fn required_name(field: &str, raw: &str) -> Result<String, QueryError> {
    let name = normalize_name(raw);
    if name.is_empty() {
        return Err(QueryError::InvalidInput(format!("{field} is required")));
    }
    Ok(name)
}

/// Requested year, or the current period's; must look like `2024-2025`.
fn financial_year(requested: Option<&str>, period: &ReportingPeriod) -> Result<String, QueryError> {
    let Some(raw) = requested.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(period.financial_year.clone());
    };

    let year = |part: &str| {
        (part.len() == 4 && part.bytes().all(|b| b.is_ascii_digit()))
            .then(|| part.parse::<u16>().ok())
            .flatten()
    };
    let valid = raw
        .split_once('-')
        .and_then(|(start, end)| Some((year(start)?, year(end)?)))
        .is_some_and(|(start, end)| start.checked_add(1) == Some(end));
    if !valid {
        return Err(QueryError::InvalidInput(format!(
            "year must look like 2024-2025, got '{raw}'"
        )));
    }
    Ok(raw.to_string())
}

fn snap_to_grid(degrees: f64) -> f64 {
    (degrees * COORDINATE_GRID).round() / COORDINATE_GRID
}

fn not_found(state: &str, district: &str) -> QueryError {
    QueryError::NotFound(format!("district {district} in {state}"))
}
