//! Deterministic synthetic dataset substituted when the persistent store cannot answer.
//!
//! Figures are a pure function of (state, district, reporting month): every cache miss
//! within the same month regenerates identical numbers.

mod transform;

pub use transform::{transform, RawDistrictRow};

use super::catalog;
use super::record::{normalize_name, DistrictRecord, ReportingPeriod};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Average wage plus material share per person-day, in rupees.
const COST_PER_PERSONDAY: std::ops::Range<f64> = 310.0..420.0;
const RUPEES_PER_LAKH: f64 = 100_000.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackGenerator;

impl FallbackGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Raw rows for every catalog district of `state_name`, in catalog order.
    /// Unsupported states yield an empty vector.
    pub fn generate(&self, state_name: &str, period: &ReportingPeriod) -> Vec<RawDistrictRow> {
        let state_name = normalize_name(state_name);
        catalog::districts_of(&state_name)
            .into_iter()
            .map(|district| synthesize_row(&state_name, district, period))
            .collect()
    }

    /// `generate` followed by [`transform`].
    pub fn records(&self, state_name: &str, period: &ReportingPeriod) -> Vec<DistrictRecord> {
        transform(self.generate(state_name, period))
    }

    /// One district's record for `period`, if the district is in the catalog.
    pub fn district_record(
        &self,
        state_name: &str,
        district_name: &str,
        period: &ReportingPeriod,
    ) -> Option<DistrictRecord> {
        let state_name = normalize_name(state_name);
        let district_name = normalize_name(district_name);
        catalog::districts_of(&state_name)
            .into_iter()
            .find(|district| *district == district_name)
            .map(|district| synthesize_row(&state_name, district, period))
            .and_then(|row| transform(vec![row]).into_iter().next())
    }

    /// District names the fallback dataset covers for a state.
    pub fn district_names(&self, state_name: &str) -> Vec<String> {
        catalog::districts_of(&normalize_name(state_name))
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

fn synthesize_row(state_name: &str, district_name: &str, period: &ReportingPeriod) -> RawDistrictRow {
    let mut rng = StdRng::seed_from_u64(seed_for(state_name, district_name, &period.month_year));

    let job_cards: u64 = rng.gen_range(120_000..650_000);
    let workers = scale(job_cards, rng.gen_range(1.3..1.9));
    let active_workers = scale(workers, rng.gen_range(0.35..0.65));
    let women_workers = scale(active_workers, rng.gen_range(0.38..0.62));
    let households_worked = scale(job_cards, rng.gen_range(0.25..0.55));
    let days_per_household: f64 = rng.gen_range(22.0..78.0);
    let persondays = (households_worked as f64 * days_per_household).round() as u64;
    let expenditure_lakhs =
        round_to(persondays as f64 * rng.gen_range(COST_PER_PERSONDAY) / RUPEES_PER_LAKH, 2);

    let works_taken_up: u64 = rng.gen_range(1_800..9_500);
    let completed_works = scale(works_taken_up, rng.gen_range(0.30..0.70));
    let remaining = works_taken_up - completed_works;
    let ongoing_works = scale(remaining, rng.gen_range(0.55..0.95));

    RawDistrictRow {
        state_name: state_name.to_string(),
        district_name: district_name.to_string(),
        fin_year: period.financial_year.clone(),
        month: period.month_year.clone(),
        job_cards_issued: job_cards,
        workers,
        active_workers,
        women_workers,
        expenditure_lakhs,
        persondays,
        households_worked,
        works_taken_up,
        completed_works,
        ongoing_works,
    }
}

fn scale(value: u64, factor: f64) -> u64 {
    (value as f64 * factor).round() as u64
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// FNV-1a over the identity tuple; stable across processes and platforms.
fn seed_for(state_name: &str, district_name: &str, month_year: &str) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    [state_name, district_name, month_year]
        .iter()
        .flat_map(|part| part.bytes().chain(std::iter::once(b'|')))
        .fold(OFFSET, |hash, byte| (hash ^ u64::from(byte)).wrapping_mul(PRIME))
}
