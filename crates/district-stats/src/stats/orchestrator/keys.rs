use std::fmt;

/// Deterministic cache identity of a query: (query type, state, district, year).
#[derive(Debug, Clone, PartialEq)]
pub enum CacheKey {
    Districts {
        state: String,
    },
    States,
    DistrictDetail {
        state: String,
        district: String,
        year: String,
    },
    DistrictSummary {
        state: String,
        district: String,
        year: String,
    },
    StateOverview {
        state: String,
        year: String,
    },
    Nearest {
        latitude: f64,
        longitude: f64,
    },
    DistrictsMap,
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::Districts { state } => write!(f, "districts_{state}"),
            CacheKey::States => write!(f, "all_states"),
            CacheKey::DistrictDetail {
                state,
                district,
                year,
            } => write!(f, "district_{state}_{district}_{year}"),
            CacheKey::DistrictSummary {
                state,
                district,
                year,
            } => write!(f, "summary_{state}_{district}_{year}"),
            CacheKey::StateOverview { state, year } => write!(f, "state_overview_{state}_{year}"),
            CacheKey::Nearest {
                latitude,
                longitude,
            } => write!(f, "nearest_{latitude}_{longitude}"),
            CacheKey::DistrictsMap => write!(f, "districts_map"),
        }
    }
}
