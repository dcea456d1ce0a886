use crate::stats::record::{normalize_name, DataSource, DistrictRecord};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

const RUPEES_PER_LAKH: f64 = 100_000.0;

/// One district-month row in the shape of the upstream open-data feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDistrictRow {
    pub state_name: String,
    pub district_name: String,
    pub fin_year: String,
    pub month: String,
    #[serde(rename = "Total_No_of_JobCards_issued")]
    pub job_cards_issued: u64,
    #[serde(rename = "Total_No_of_Workers")]
    pub workers: u64,
    #[serde(rename = "Total_No_of_Active_Workers")]
    pub active_workers: u64,
    #[serde(rename = "Women_Workers")]
    pub women_workers: u64,
    /// Expenditure in lakh rupees.
    #[serde(rename = "Total_Exp")]
    pub expenditure_lakhs: f64,
    #[serde(rename = "Persondays_of_Central_Liability_so_far")]
    pub persondays: u64,
    #[serde(rename = "Total_Households_Worked")]
    pub households_worked: u64,
    #[serde(rename = "Total_No_of_Works_Takenup")]
    pub works_taken_up: u64,
    #[serde(rename = "Number_of_Completed_Works")]
    pub completed_works: u64,
    #[serde(rename = "Number_of_Ongoing_Works")]
    pub ongoing_works: u64,
}

/// Normalizes raw rows into [`DistrictRecord`]s stamped as sample data.
///
/// Expenditure is converted from lakhs to rupees and the per-household average is
/// derived here once. Rows with negative or non-finite expenditure are dropped.
pub fn transform(rows: Vec<RawDistrictRow>) -> Vec<DistrictRecord> {
    rows.into_iter().filter_map(transform_row).collect()
}

fn transform_row(row: RawDistrictRow) -> Option<DistrictRecord> {
    if !row.expenditure_lakhs.is_finite() || row.expenditure_lakhs < 0.0 {
        warn!(
            state = %row.state_name,
            district = %row.district_name,
            expenditure = row.expenditure_lakhs,
            "dropping row with invalid expenditure"
        );
        return None;
    }

    let average_days_per_household = if row.households_worked > 0 {
        round_to_hundredths(row.persondays as f64 / row.households_worked as f64)
    } else {
        0.0
    };
    let last_updated = month_start(&row.month);

    Some(DistrictRecord {
        state_name: normalize_name(&row.state_name),
        district_name: normalize_name(&row.district_name),
        financial_year: row.fin_year,
        month_year: row.month,
        total_job_cards: row.job_cards_issued,
        total_workers: row.workers,
        active_workers: row.active_workers,
        women_workers: row.women_workers,
        total_expenditure: (row.expenditure_lakhs * RUPEES_PER_LAKH).round(),
        total_works: row.works_taken_up,
        completed_works: row.completed_works,
        ongoing_works: row.ongoing_works,
        average_days_per_household,
        data_source: DataSource::Sample,
        last_updated,
    })
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn month_start(month_year: &str) -> DateTime<Utc> {
    NaiveDate::parse_from_str(&format!("{month_year}-01"), "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}
