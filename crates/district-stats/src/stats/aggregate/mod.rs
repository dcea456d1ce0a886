//! Pure aggregate computations over [`DistrictRecord`](super::record::DistrictRecord)s.
//!
//! Nothing here performs I/O and nothing here fails: degenerate inputs (no records, zero
//! denominators) resolve to `0` or `None` by policy.

mod comparison;
mod overview;
mod summary;

pub use comparison::{
    completion_rate, district_vs_state_comparison, employment_rate, percent_of,
    DistrictComparison,
};
pub use overview::{
    state_average, state_overview, top_performers, StateAverage, StateOverview, TopPerformer,
    DEFAULT_TOP_PERFORMERS,
};
pub use summary::{format_inr, DistrictSummary, SummaryIndicators, SummaryMetrics};

pub(crate) fn round_to_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
