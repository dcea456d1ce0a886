use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Provenance of a [`DistrictRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Live,
    Sample,
}

/// One state/district/financial-year/month statistics snapshot.
///
/// Derived fields (`average_days_per_household`) are computed once when the record is
/// built from a raw row and never recomputed downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictRecord {
    pub state_name: String,
    pub district_name: String,
    pub financial_year: String,
    pub month_year: String,
    pub total_job_cards: u64,
    pub total_workers: u64,
    pub active_workers: u64,
    pub women_workers: u64,
    pub total_expenditure: f64,
    pub total_works: u64,
    pub completed_works: u64,
    pub ongoing_works: u64,
    pub average_days_per_household: f64,
    pub data_source: DataSource,
    #[serde(alias = "updatedAt")]
    pub last_updated: DateTime<Utc>,
}

impl DistrictRecord {
    pub fn key(&self) -> RecordKey {
        RecordKey {
            state_name: self.state_name.clone(),
            district_name: self.district_name.clone(),
            financial_year: self.financial_year.clone(),
            month_year: self.month_year.clone(),
        }
    }
}

/// Identity of a record; ingestion upserts by this tuple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordKey {
    pub state_name: String,
    pub district_name: String,
    pub financial_year: String,
    pub month_year: String,
}

/// Calendar context the fallback dataset and default queries are pinned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportingPeriod {
    /// April-March financial year, e.g. `2026-2027`.
    pub financial_year: String,
    /// `YYYY-MM`, sortable as text.
    pub month_year: String,
    #[serde(skip)]
    pub as_of: NaiveDate,
}

impl ReportingPeriod {
    pub fn from_date(date: NaiveDate) -> Self {
        let start_year = if date.month() >= 4 {
            date.year()
        } else {
            date.year() - 1
        };

        Self {
            financial_year: format!("{}-{}", start_year, start_year + 1),
            month_year: format!("{:04}-{:02}", date.year(), date.month()),
            as_of: date,
        }
    }

    pub fn current() -> Self {
        Self::from_date(Utc::now().date_naive())
    }

    /// This period and the `count - 1` months before it, newest first.
    pub fn trailing(&self, count: usize) -> Vec<ReportingPeriod> {
        (0..count)
            .map_while(|back| {
                let back = u32::try_from(back).ok()?;
                self.as_of.checked_sub_months(Months::new(back))
            })
            .map(Self::from_date)
            .collect()
    }
}

/// Uppercases and trims a state or district name the way records store them.
pub fn normalize_name(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}
