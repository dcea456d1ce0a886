//! Loads the fallback dataset into a store so a fresh deployment has something to serve.

use super::catalog::SUPPORTED_STATES;
use super::fallback::FallbackGenerator;
use super::record::{DataSource, ReportingPeriod};
use super::store::{DistrictStore, StoreError, UpsertOutcome};
use chrono::Utc;
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSeedSummary {
    pub state: String,
    pub records: usize,
    pub total_workers: u64,
    pub total_expenditure: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedReport {
    pub states: Vec<StateSeedSummary>,
    pub inserted: usize,
    pub updated: usize,
}

impl SeedReport {
    pub fn total_records(&self) -> usize {
        self.inserted + self.updated
    }
}

/// Upserts the generated records of each state for `period`. Pass `None` to seed every
/// supported state. Re-running for the same period replaces records in place.
pub async fn seed_fallback_dataset<S>(
    store: &S,
    generator: &FallbackGenerator,
    states: Option<&[&str]>,
    period: &ReportingPeriod,
) -> Result<SeedReport, StoreError>
where
    S: DistrictStore + ?Sized,
{
    let states = states.unwrap_or(&SUPPORTED_STATES);
    let seeded_at = Utc::now();
    let mut report = SeedReport::default();

    for state in states {
        let records = generator.records(state, period);
        let mut summary = StateSeedSummary {
            state: state.to_string(),
            records: records.len(),
            total_workers: 0,
            total_expenditure: 0.0,
        };

        for mut record in records {
            summary.total_workers += record.total_workers;
            summary.total_expenditure += record.total_expenditure;
            record.data_source = DataSource::Sample;
            record.last_updated = seeded_at;

            match store.upsert_record(record).await? {
                UpsertOutcome::Inserted => report.inserted += 1,
                UpsertOutcome::Updated => report.updated += 1,
            }
        }

        info!(
            state = %summary.state,
            records = summary.records,
            total_workers = summary.total_workers,
            "seeded state"
        );
        report.states.push(summary);
    }

    Ok(report)
}
