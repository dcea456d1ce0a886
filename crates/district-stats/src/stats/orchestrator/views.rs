use crate::stats::aggregate::{
    DistrictComparison, DistrictSummary, StateAverage, StateOverview, TopPerformer,
};
use crate::stats::catalog::DistrictLocation;
use crate::stats::locator::NearestDistrict;
use crate::stats::record::DistrictRecord;
use serde::Serialize;

/// Where a response payload came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseSource {
    Cache,
    Database,
    Fallback,
}

/// A payload annotated with its [`ResponseSource`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sourced<T> {
    pub source: ResponseSource,
    pub data: T,
}

impl<T> Sourced<T> {
    pub fn new(source: ResponseSource, data: T) -> Self {
        Self { source, data }
    }
}

/// Current snapshot, recent history and state comparison for one district.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictDetail {
    pub current: DistrictRecord,
    pub historical: Vec<DistrictRecord>,
    pub state_average: Option<StateAverage>,
    pub comparison: DistrictComparison,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateReport {
    pub overview: StateOverview,
    pub top_performers: Vec<TopPerformer>,
}

/// Computed results held by the TTL cache.
#[derive(Debug, Clone)]
pub(crate) enum CachedPayload {
    Names(Vec<String>),
    Detail(DistrictDetail),
    Summary(DistrictSummary),
    Report(StateReport),
    Nearest(NearestDistrict),
    Locations(Vec<DistrictLocation>),
}
