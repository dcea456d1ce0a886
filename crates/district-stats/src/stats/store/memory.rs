use super::{DistrictStore, StoreError, UpsertOutcome};
use crate::stats::aggregate::{
    state_average, state_overview, top_performers, StateAverage, StateOverview, TopPerformer,
};
use crate::stats::record::{DistrictRecord, RecordKey};
use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

/// Process-local store with a reachability switch, used by the service binary and tests.
#[derive(Debug, Clone)]
pub struct InMemoryDistrictStore {
    records: Arc<RwLock<BTreeMap<RecordKey, DistrictRecord>>>,
    reachable: Arc<AtomicBool>,
}

impl Default for InMemoryDistrictStore {
    fn default() -> Self {
        Self {
            records: Arc::default(),
            reachable: Arc::new(AtomicBool::new(true)),
        }
    }
}

impl InMemoryDistrictStore {
    pub fn unreachable() -> Self {
        let store = Self::default();
        store.set_reachable(false);
        store
    }

    pub fn set_reachable(&self, reachable: bool) {
        self.reachable.store(reachable, Ordering::Release);
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, BTreeMap<RecordKey, DistrictRecord>> {
        self.records.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn ensure_reachable(&self) -> Result<(), StoreError> {
        if self.reachable.load(Ordering::Acquire) {
            Ok(())
        } else {
            Err(StoreError::Unavailable("in-memory store is offline".to_string()))
        }
    }

    /// Latest month of each district of the state within the year, by district name.
    fn latest_per_district(&self, state_name: &str, financial_year: &str) -> Vec<DistrictRecord> {
        let records = self.read();
        let mut latest: BTreeMap<&str, &DistrictRecord> = BTreeMap::new();
        for record in records.values().filter(|record| {
            record.state_name == state_name && record.financial_year == financial_year
        }) {
            latest
                .entry(record.district_name.as_str())
                .and_modify(|kept| {
                    if record.month_year > kept.month_year {
                        *kept = record;
                    }
                })
                .or_insert(record);
        }
        let latest: Vec<DistrictRecord> = latest.into_values().cloned().collect();
        latest
    }
}

#[async_trait]
impl DistrictStore for InMemoryDistrictStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.ensure_reachable()
    }

    async fn distinct_districts(&self, state_name: &str) -> Result<Vec<String>, StoreError> {
        self.ensure_reachable()?;
        let districts: BTreeSet<String> = self
            .read()
            .values()
            .filter(|record| record.state_name == state_name)
            .map(|record| record.district_name.clone())
            .collect();
        Ok(districts.into_iter().collect())
    }

    async fn distinct_states(&self) -> Result<Vec<String>, StoreError> {
        self.ensure_reachable()?;
        let states: BTreeSet<String> = self
            .read()
            .values()
            .map(|record| record.state_name.clone())
            .collect();
        Ok(states.into_iter().collect())
    }

    async fn find_current_record(
        &self,
        state_name: &str,
        district_name: &str,
        financial_year: &str,
    ) -> Result<Option<DistrictRecord>, StoreError> {
        self.ensure_reachable()?;
        Ok(self
            .read()
            .values()
            .filter(|record| {
                record.state_name == state_name
                    && record.district_name == district_name
                    && record.financial_year == financial_year
            })
            .max_by_key(|record| record.last_updated)
            .cloned())
    }

    async fn find_recent_records(
        &self,
        state_name: &str,
        district_name: &str,
        limit: usize,
    ) -> Result<Vec<DistrictRecord>, StoreError> {
        self.ensure_reachable()?;
        let mut records: Vec<DistrictRecord> = self
            .read()
            .values()
            .filter(|record| {
                record.state_name == state_name && record.district_name == district_name
            })
            .cloned()
            .collect();
        records.sort_by(|a, b| b.month_year.cmp(&a.month_year));
        records.truncate(limit);
        Ok(records)
    }

    async fn aggregate_state_average(
        &self,
        state_name: &str,
        financial_year: &str,
    ) -> Result<Option<StateAverage>, StoreError> {
        self.ensure_reachable()?;
        Ok(state_average(&self.latest_per_district(state_name, financial_year)))
    }

    async fn aggregate_state_overview(
        &self,
        state_name: &str,
        financial_year: &str,
    ) -> Result<Option<StateOverview>, StoreError> {
        self.ensure_reachable()?;
        let records = self.latest_per_district(state_name, financial_year);
        if records.is_empty() {
            return Ok(None);
        }
        Ok(Some(state_overview(&records)))
    }

    async fn top_districts_by_days(
        &self,
        state_name: &str,
        financial_year: &str,
        limit: usize,
    ) -> Result<Vec<TopPerformer>, StoreError> {
        self.ensure_reachable()?;
        Ok(top_performers(
            &self.latest_per_district(state_name, financial_year),
            limit,
        ))
    }

    async fn upsert_record(&self, record: DistrictRecord) -> Result<UpsertOutcome, StoreError> {
        self.ensure_reachable()?;
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        let outcome = match records.insert(record.key(), record) {
            Some(_) => UpsertOutcome::Updated,
            None => UpsertOutcome::Inserted,
        };
        Ok(outcome)
    }
}
