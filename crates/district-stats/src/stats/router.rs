use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::orchestrator::{DistrictStatsService, QueryError, DEFAULT_STATE};
use super::store::DistrictStore;

/// Router exposing the read-only district statistics API.
pub fn district_router<S>(service: Arc<DistrictStatsService<S>>) -> Router
where
    S: DistrictStore + 'static,
{
    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/districts", get(districts_handler::<S>))
        .route("/api/districts/:district", get(district_detail_handler::<S>))
        .route(
            "/api/districts/:district/summary",
            get(district_summary_handler::<S>),
        )
        .route("/api/states", get(states_handler::<S>))
        .route("/api/states/:state/overview", get(state_overview_handler::<S>))
        .route(
            "/api/location/detect-district",
            post(detect_district_handler::<S>),
        )
        .route("/api/location/districts-map", get(districts_map_handler::<S>))
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct StatsQuery {
    state: Option<String>,
    year: Option<String>,
}

impl StatsQuery {
    fn state(&self) -> &str {
        self.state
            .as_deref()
            .filter(|state| !state.trim().is_empty())
            .unwrap_or(DEFAULT_STATE)
    }

    fn year(&self) -> Option<&str> {
        self.year.as_deref()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct DetectDistrictRequest {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct HealthView {
    status: &'static str,
    timestamp: chrono::DateTime<Utc>,
}

fn respond<T: Serialize>(result: Result<T, QueryError>, expose_internal: bool) -> Response {
    match result {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(error) => {
            if matches!(error, QueryError::Store(_)) {
                tracing::error!(%error, "query failed");
            }
            error.into_response_with(expose_internal)
        }
    }
}

pub(crate) async fn health_handler() -> Json<HealthView> {
    Json(HealthView {
        status: "ok",
        timestamp: Utc::now(),
    })
}

pub(crate) async fn districts_handler<S>(
    State(service): State<Arc<DistrictStatsService<S>>>,
    Query(query): Query<StatsQuery>,
) -> Response
where
    S: DistrictStore + 'static,
{
    let result = service.list_districts(query.state()).await;
    respond(result, service.exposes_internal_errors())
}

pub(crate) async fn district_detail_handler<S>(
    State(service): State<Arc<DistrictStatsService<S>>>,
    Path(district): Path<String>,
    Query(query): Query<StatsQuery>,
) -> Response
where
    S: DistrictStore + 'static,
{
    let result = service
        .district_detail(&district, query.state(), query.year())
        .await;
    respond(result, service.exposes_internal_errors())
}

pub(crate) async fn district_summary_handler<S>(
    State(service): State<Arc<DistrictStatsService<S>>>,
    Path(district): Path<String>,
    Query(query): Query<StatsQuery>,
) -> Response
where
    S: DistrictStore + 'static,
{
    let result = service
        .district_summary(&district, query.state(), query.year())
        .await;
    respond(result, service.exposes_internal_errors())
}

pub(crate) async fn states_handler<S>(
    State(service): State<Arc<DistrictStatsService<S>>>,
) -> Response
where
    S: DistrictStore + 'static,
{
    let result = service.list_states().await;
    respond(result, service.exposes_internal_errors())
}

pub(crate) async fn state_overview_handler<S>(
    State(service): State<Arc<DistrictStatsService<S>>>,
    Path(state): Path<String>,
    Query(query): Query<StatsQuery>,
) -> Response
where
    S: DistrictStore + 'static,
{
    let result = service.state_overview(&state, query.year()).await;
    respond(result, service.exposes_internal_errors())
}

pub(crate) async fn detect_district_handler<S>(
    State(service): State<Arc<DistrictStatsService<S>>>,
    Json(request): Json<DetectDistrictRequest>,
) -> Response
where
    S: DistrictStore + 'static,
{
    let (Some(latitude), Some(longitude)) = (request.latitude, request.longitude) else {
        let payload = json!({ "error": "Latitude and longitude are required" });
        return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
    };

    let result = service.nearest_district(latitude, longitude);
    respond(result, service.exposes_internal_errors())
}

pub(crate) async fn districts_map_handler<S>(
    State(service): State<Arc<DistrictStatsService<S>>>,
) -> Response
where
    S: DistrictStore + 'static,
{
    (StatusCode::OK, Json(service.districts_map())).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::store::InMemoryDistrictStore;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use chrono::NaiveDate;
    use serde_json::Value;
    use std::time::Duration;
    use tower::ServiceExt;

    fn router(store: InMemoryDistrictStore) -> Router {
        let service = DistrictStatsService::new(
            Arc::new(store),
            Duration::from_secs(60),
            Duration::from_millis(50),
        )
        .with_reporting_date(NaiveDate::from_ymd_opt(2026, 10, 18).expect("valid date"));
        district_router(Arc::new(service))
    }

    async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
        let response = router
            .oneshot(Request::get(uri).body(Body::empty()).expect("request"))
            .await
            .expect("router responds");
        read(response).await
    }

    async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("request");
        let response = router.oneshot(request).await.expect("router responds");
        read(response).await
    }

    async fn read(response: Response) -> (StatusCode, Value) {
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        (status, serde_json::from_slice(&bytes).expect("json body"))
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (status, body) = get_json(router(InMemoryDistrictStore::default()), "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn districts_default_to_gujarat() {
        let (status, body) =
            get_json(router(InMemoryDistrictStore::unreachable()), "/api/districts").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"], "fallback");
        assert_eq!(body["data"][0], "AHMEDABAD");
    }

    #[tokio::test]
    async fn district_detail_uses_camel_case_fields() {
        let (status, body) = get_json(
            router(InMemoryDistrictStore::unreachable()),
            "/api/districts/surat?state=gujarat",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["current"]["districtName"], "SURAT");
        assert!(body["data"]["stateAverage"]["avgDays"].is_number());
        assert!(body["data"]["historical"].is_array());
    }

    #[tokio::test]
    async fn unknown_district_is_not_found() {
        let (status, body) = get_json(
            router(InMemoryDistrictStore::unreachable()),
            "/api/districts/ATLANTIS/summary",
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap_or_default().contains("ATLANTIS"));
    }

    #[tokio::test]
    async fn malformed_year_is_bad_request() {
        let (status, _) = get_json(
            router(InMemoryDistrictStore::unreachable()),
            "/api/states/GUJARAT/overview?year=2026",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn state_overview_lists_top_performers() {
        let (status, body) = get_json(
            router(InMemoryDistrictStore::unreachable()),
            "/api/states/Maharashtra/overview",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["overview"]["totalDistricts"], 20);
        assert_eq!(body["data"]["topPerformers"].as_array().map(Vec::len), Some(5));
    }

    #[tokio::test]
    async fn detect_district_requires_both_coordinates() {
        let (status, body) = post_json(
            router(InMemoryDistrictStore::default()),
            "/api/location/detect-district",
            json!({ "latitude": 19.07 }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Latitude and longitude are required");
    }

    #[tokio::test]
    async fn detect_district_finds_nearest() {
        let (status, body) = post_json(
            router(InMemoryDistrictStore::default()),
            "/api/location/detect-district",
            json!({ "latitude": 21.17, "longitude": 72.83 }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"], "fallback");
        assert_eq!(body["data"]["district"], "SURAT");
        assert_eq!(body["data"]["confidence"], "high");
    }

    #[tokio::test]
    async fn districts_map_exposes_coordinates() {
        let (status, body) = get_json(
            router(InMemoryDistrictStore::default()),
            "/api/location/districts-map",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let first = &body["data"][0];
        assert_eq!(first["name"], "AHMEDABAD");
        assert_eq!(first["state"], "GUJARAT");
        assert!(first["latitude"].is_number());
    }
}
