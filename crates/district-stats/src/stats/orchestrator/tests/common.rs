use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};

use crate::stats::aggregate::{StateAverage, StateOverview, TopPerformer};
use crate::stats::orchestrator::DistrictStatsService;
use crate::stats::record::{DataSource, DistrictRecord};
use crate::stats::store::{DistrictStore, StoreError, UpsertOutcome};

pub(super) const STORE_TIMEOUT: Duration = Duration::from_millis(50);

/// Mid-October 2026: financial year `2026-2027`, month `2026-10`.
pub(super) fn reporting_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).expect("valid date")
}

pub(super) fn service<S: DistrictStore + 'static>(store: S) -> DistrictStatsService<S> {
    DistrictStatsService::new(Arc::new(store), Duration::from_secs(60), STORE_TIMEOUT)
        .with_reporting_date(reporting_date())
}

/// A Gujarat record for `month` (`2026-MM`), updated early in that month.
pub(super) fn record(district: &str, month: &str, job_cards: u64, days: f64) -> DistrictRecord {
    let month_number: u32 = month[5..].parse().expect("month like 2026-10");
    DistrictRecord {
        state_name: "GUJARAT".to_string(),
        district_name: district.to_string(),
        financial_year: "2026-2027".to_string(),
        month_year: month.to_string(),
        total_job_cards: job_cards,
        total_workers: job_cards * 2,
        active_workers: job_cards,
        women_workers: job_cards / 2,
        total_expenditure: 2_500_000.0,
        total_works: 40,
        completed_works: 30,
        ongoing_works: 8,
        average_days_per_household: days,
        data_source: DataSource::Live,
        last_updated: Utc.with_ymd_and_hms(2026, month_number, 2, 6, 0, 0).unwrap(),
    }
}

/// Answers every call eventually, but far slower than [`STORE_TIMEOUT`].
pub(super) struct SlowStore;

impl SlowStore {
    async fn stall() {
        tokio::time::sleep(Duration::from_secs(5)).await;
    }
}

#[async_trait]
impl DistrictStore for SlowStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Self::stall().await;
        Ok(())
    }

    async fn distinct_districts(&self, _state_name: &str) -> Result<Vec<String>, StoreError> {
        Self::stall().await;
        Ok(vec!["SLOW".to_string()])
    }

    async fn distinct_states(&self) -> Result<Vec<String>, StoreError> {
        Self::stall().await;
        Ok(vec!["SLOW".to_string()])
    }

    async fn find_current_record(
        &self,
        _state_name: &str,
        _district_name: &str,
        _financial_year: &str,
    ) -> Result<Option<DistrictRecord>, StoreError> {
        Self::stall().await;
        Ok(None)
    }

    async fn find_recent_records(
        &self,
        _state_name: &str,
        _district_name: &str,
        _limit: usize,
    ) -> Result<Vec<DistrictRecord>, StoreError> {
        Self::stall().await;
        Ok(Vec::new())
    }

    async fn aggregate_state_average(
        &self,
        _state_name: &str,
        _financial_year: &str,
    ) -> Result<Option<StateAverage>, StoreError> {
        Self::stall().await;
        Ok(None)
    }

    async fn aggregate_state_overview(
        &self,
        _state_name: &str,
        _financial_year: &str,
    ) -> Result<Option<StateOverview>, StoreError> {
        Self::stall().await;
        Ok(None)
    }

    async fn top_districts_by_days(
        &self,
        _state_name: &str,
        _financial_year: &str,
        _limit: usize,
    ) -> Result<Vec<TopPerformer>, StoreError> {
        Self::stall().await;
        Ok(Vec::new())
    }

    async fn upsert_record(&self, _record: DistrictRecord) -> Result<UpsertOutcome, StoreError> {
        Self::stall().await;
        Ok(UpsertOutcome::Inserted)
    }
}

/// Reachable, but every query fails.
pub(super) struct BrokenStore;

fn broken() -> StoreError {
    StoreError::Query("index corrupted".to_string())
}

#[async_trait]
impl DistrictStore for BrokenStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn distinct_districts(&self, _state_name: &str) -> Result<Vec<String>, StoreError> {
        Err(broken())
    }

    async fn distinct_states(&self) -> Result<Vec<String>, StoreError> {
        Err(broken())
    }

    async fn find_current_record(
        &self,
        _state_name: &str,
        _district_name: &str,
        _financial_year: &str,
    ) -> Result<Option<DistrictRecord>, StoreError> {
        Err(broken())
    }

    async fn find_recent_records(
        &self,
        _state_name: &str,
        _district_name: &str,
        _limit: usize,
    ) -> Result<Vec<DistrictRecord>, StoreError> {
        Err(broken())
    }

    async fn aggregate_state_average(
        &self,
        _state_name: &str,
        _financial_year: &str,
    ) -> Result<Option<StateAverage>, StoreError> {
        Err(broken())
    }

    async fn aggregate_state_overview(
        &self,
        _state_name: &str,
        _financial_year: &str,
    ) -> Result<Option<StateOverview>, StoreError> {
        Err(broken())
    }

    async fn top_districts_by_days(
        &self,
        _state_name: &str,
        _financial_year: &str,
        _limit: usize,
    ) -> Result<Vec<TopPerformer>, StoreError> {
        Err(broken())
    }

    async fn upsert_record(&self, _record: DistrictRecord) -> Result<UpsertOutcome, StoreError> {
        Err(broken())
    }
}
