use super::overview::StateAverage;
use super::round_to_tenths;
use crate::stats::record::DistrictRecord;
use serde::{Deserialize, Serialize};

/// A district's metrics as a percentage of the state's per-district average.
/// A ratio is `None` whenever its state average is zero or unknown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictComparison {
    pub job_cards_vs_state: Option<f64>,
    pub workers_vs_state: Option<f64>,
    pub days_vs_state: Option<f64>,
}

/// `current / average * 100`, rounded to one decimal.
pub fn percent_of(current: f64, average: Option<f64>) -> Option<f64> {
    match average {
        Some(average) if average != 0.0 && average.is_finite() => {
            Some(round_to_tenths(current / average * 100.0))
        }
        _ => None,
    }
}

pub fn district_vs_state_comparison(
    current: &DistrictRecord,
    state_average: Option<&StateAverage>,
) -> DistrictComparison {
    DistrictComparison {
        job_cards_vs_state: percent_of(
            current.total_job_cards as f64,
            state_average.map(|average| average.avg_job_cards),
        ),
        workers_vs_state: percent_of(
            current.total_workers as f64,
            state_average.map(|average| average.avg_workers),
        ),
        days_vs_state: percent_of(
            current.average_days_per_household,
            state_average.map(|average| average.avg_days),
        ),
    }
}

/// Share of registered workers that are active, in percent. `0` without workers.
pub fn employment_rate(record: &DistrictRecord) -> f64 {
    if record.total_workers == 0 {
        return 0.0;
    }
    round_to_tenths(record.active_workers as f64 / record.total_workers as f64 * 100.0)
}

/// Share of works completed, in percent. `0` without works.
pub fn completion_rate(record: &DistrictRecord) -> f64 {
    if record.total_works == 0 {
        return 0.0;
    }
    round_to_tenths(record.completed_works as f64 / record.total_works as f64 * 100.0)
}
