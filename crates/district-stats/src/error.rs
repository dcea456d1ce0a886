use crate::config::ConfigError;
use crate::stats::{LocateError, StoreError};
use crate::telemetry::TelemetryError;

/// Failures that end a command of the service binary.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("location error: {0}")]
    Locate(#[from] LocateError),
    #[error("export error: {0}")]
    Export(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed() -> Result<(), AppError> {
        let outcome: Result<(), StoreError> = Err(StoreError::Unavailable("offline".to_string()));
        outcome?;
        Ok(())
    }

    #[test]
    fn store_and_locate_failures_convert_with_context() {
        let err = seed().expect_err("store failure");
        assert_eq!(err.to_string(), "store error: store unavailable: offline");

        let err = AppError::from(LocateError::LatitudeOutOfRange(91.0));
        assert!(matches!(err, AppError::Locate(_)));
        assert!(err.to_string().starts_with("location error: latitude"));
    }
}
