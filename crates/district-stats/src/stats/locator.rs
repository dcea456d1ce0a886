use super::catalog::{DistrictLocation, DISTRICT_LOCATIONS};
use serde::Serialize;

const EARTH_RADIUS_KM: f64 = 6371.0;
const HIGH_CONFIDENCE_KM: f64 = 50.0;
const MEDIUM_CONFIDENCE_KM: f64 = 100.0;
const UNKNOWN: &str = "UNKNOWN";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceBand {
    High,
    Medium,
    Low,
}

impl ConfidenceBand {
    pub fn for_distance(distance_km: f64) -> Self {
        if distance_km < HIGH_CONFIDENCE_KM {
            Self::High
        } else if distance_km < MEDIUM_CONFIDENCE_KM {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearestDistrict {
    pub district: String,
    pub state: String,
    pub confidence: ConfidenceBand,
    /// Great-circle distance rounded to one decimal; `None` when nothing is known.
    pub distance_km: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LocateError {
    #[error("latitude must be within [-90, 90], got {0}")]
    LatitudeOutOfRange(f64),
    #[error("longitude must be within [-180, 180], got {0}")]
    LongitudeOutOfRange(f64),
}

/// Linear scan over a static table of district coordinates.
#[derive(Debug, Clone)]
pub struct NearestDistrictLocator {
    locations: Vec<DistrictLocation>,
}

impl Default for NearestDistrictLocator {
    fn default() -> Self {
        Self::standard()
    }
}

impl NearestDistrictLocator {
    /// Every district of every supported state.
    pub fn standard() -> Self {
        Self::new(DISTRICT_LOCATIONS.to_vec())
    }

    pub fn new(locations: Vec<DistrictLocation>) -> Self {
        Self { locations }
    }

    pub fn locations(&self) -> &[DistrictLocation] {
        &self.locations
    }

    /// Closest known district to the coordinate. Exact distance ties keep the entry
    /// seen first; an empty table answers `UNKNOWN` with no distance.
    pub fn locate(&self, latitude: f64, longitude: f64) -> Result<NearestDistrict, LocateError> {
        validate_coordinate(latitude, longitude)?;

        let nearest = self
            .locations
            .iter()
            .map(|location| {
                let distance =
                    haversine_km(latitude, longitude, location.latitude, location.longitude);
                (location, distance)
            })
            .fold(None::<(&DistrictLocation, f64)>, |best, candidate| match best {
                Some((_, best_distance)) if best_distance <= candidate.1 => best,
                _ => Some(candidate),
            });

        Ok(match nearest {
            Some((location, distance)) => NearestDistrict {
                district: location.district_name.to_string(),
                state: location.state_name.to_string(),
                confidence: ConfidenceBand::for_distance(distance),
                distance_km: Some((distance * 10.0).round() / 10.0),
            },
            None => NearestDistrict {
                district: UNKNOWN.to_string(),
                state: UNKNOWN.to_string(),
                confidence: ConfidenceBand::Low,
                distance_km: None,
            },
        })
    }
}

pub fn validate_coordinate(latitude: f64, longitude: f64) -> Result<(), LocateError> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(LocateError::LatitudeOutOfRange(latitude));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(LocateError::LongitudeOutOfRange(longitude));
    }
    Ok(())
}

/// Great-circle distance in kilometres.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}
