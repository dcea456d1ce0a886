use crate::stats::locator::LocateError;
use crate::stats::store::StoreError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

const GENERIC_FAILURE: &str = "Something went wrong";

/// Failures a query can surface to its caller.
///
/// Store unavailability never appears here: it is absorbed by switching to the
/// fallback dataset.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<LocateError> for QueryError {
    fn from(value: LocateError) -> Self {
        Self::InvalidInput(value.to_string())
    }
}

impl QueryError {
    pub fn status(&self) -> StatusCode {
        match self {
            QueryError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            QueryError::NotFound(_) => StatusCode::NOT_FOUND,
            QueryError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON error response; internal detail is attached only when `expose_internal`.
    pub fn into_response_with(self, expose_internal: bool) -> Response {
        let status = self.status();
        let payload = match &self {
            QueryError::Store(err) if expose_internal => {
                json!({ "error": GENERIC_FAILURE, "message": err.to_string() })
            }
            QueryError::Store(_) => json!({ "error": GENERIC_FAILURE }),
            other => json!({ "error": other.to_string() }),
        };
        (status, Json(payload)).into_response()
    }
}
