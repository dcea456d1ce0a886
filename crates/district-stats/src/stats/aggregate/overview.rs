use crate::stats::record::DistrictRecord;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TOP_PERFORMERS: usize = 5;

/// State-level sums across a set of district records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateOverview {
    pub total_districts: u64,
    pub total_job_cards: u64,
    pub total_workers: u64,
    pub active_workers: u64,
    pub total_expenditure: f64,
    pub total_works: u64,
    pub completed_works: u64,
    /// Mean of `averageDaysPerHousehold` across the records.
    pub avg_days: f64,
    pub women_workers: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopPerformer {
    pub district_name: String,
    pub average_days_per_household: f64,
    pub active_workers: u64,
}

impl From<&DistrictRecord> for TopPerformer {
    fn from(record: &DistrictRecord) -> Self {
        Self {
            district_name: record.district_name.clone(),
            average_days_per_household: record.average_days_per_household,
            active_workers: record.active_workers,
        }
    }
}

/// Per-district means used as the denominator of district comparisons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateAverage {
    pub avg_job_cards: f64,
    pub avg_workers: f64,
    pub avg_days: f64,
    pub avg_expenditure: f64,
}

pub fn state_overview(records: &[DistrictRecord]) -> StateOverview {
    let mut overview = records
        .iter()
        .fold(StateOverview::default(), |mut acc, record| {
            acc.total_districts += 1;
            acc.total_job_cards += record.total_job_cards;
            acc.total_workers += record.total_workers;
            acc.active_workers += record.active_workers;
            acc.total_expenditure += record.total_expenditure;
            acc.total_works += record.total_works;
            acc.completed_works += record.completed_works;
            acc.avg_days += record.average_days_per_household;
            acc.women_workers += record.women_workers;
            acc
        });

    overview.avg_days = if overview.total_districts > 0 {
        overview.avg_days / overview.total_districts as f64
    } else {
        0.0
    };
    overview
}

/// The `n` districts with the most days of work per household, best first.
///
/// The sort is stable: districts with equal averages keep their input order.
pub fn top_performers(records: &[DistrictRecord], n: usize) -> Vec<TopPerformer> {
    let mut ranked: Vec<&DistrictRecord> = records.iter().collect();
    ranked.sort_by(|a, b| {
        b.average_days_per_household
            .total_cmp(&a.average_days_per_household)
    });
    ranked.into_iter().take(n).map(TopPerformer::from).collect()
}

/// `None` when there are no records to average.
pub fn state_average(records: &[DistrictRecord]) -> Option<StateAverage> {
    if records.is_empty() {
        return None;
    }

    let count = records.len() as f64;
    let mean = |field: fn(&DistrictRecord) -> f64| records.iter().map(field).sum::<f64>() / count;

    Some(StateAverage {
        avg_job_cards: mean(|record| record.total_job_cards as f64),
        avg_workers: mean(|record| record.total_workers as f64),
        avg_days: mean(|record| record.average_days_per_household),
        avg_expenditure: mean(|record| record.total_expenditure),
    })
}
