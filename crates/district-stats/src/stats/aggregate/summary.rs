use super::comparison::{completion_rate, employment_rate};
use crate::stats::record::DistrictRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Days of work per household at or above which a district counts as performing well.
const PERFORMING_WELL_DAYS: f64 = 50.0;

/// Plain-language view of a district for low-literacy audiences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictSummary {
    pub district_name: String,
    pub metrics: SummaryMetrics,
    pub indicators: SummaryIndicators,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryMetrics {
    pub total_families: u64,
    pub total_workers: u64,
    pub people_working: u64,
    pub days_of_work: u64,
    pub money_spent: String,
    pub projects_completed: u64,
    pub projects_ongoing: u64,
    pub women_workers: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryIndicators {
    pub is_performing_well: bool,
    pub employment_rate: f64,
    pub completion_rate: f64,
}

impl From<&DistrictRecord> for DistrictSummary {
    fn from(record: &DistrictRecord) -> Self {
        Self {
            district_name: record.district_name.clone(),
            metrics: SummaryMetrics {
                total_families: record.total_job_cards,
                total_workers: record.total_workers,
                people_working: record.active_workers,
                days_of_work: record.average_days_per_household.round().max(0.0) as u64,
                money_spent: format_inr(record.total_expenditure),
                projects_completed: record.completed_works,
                projects_ongoing: record.ongoing_works,
                women_workers: record.women_workers,
            },
            indicators: SummaryIndicators {
                is_performing_well: record.average_days_per_household >= PERFORMING_WELL_DAYS,
                employment_rate: employment_rate(record),
                completion_rate: completion_rate(record),
            },
            last_updated: record.last_updated,
        }
    }
}

/// Formats rupees with Indian digit grouping and no fraction digits: `₹12,34,56,789`.
pub fn format_inr(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());

    let grouped = if digits.len() <= 3 {
        digits
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut groups: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > 0 {
            let start = end.saturating_sub(2);
            groups.push(&head[start..end]);
            end = start;
        }
        groups.reverse();
        format!("{},{}", groups.join(","), tail)
    };

    format!("{sign}₹{grouped}")
}
