use chrono::NaiveDate;
use district_stats::config::StoreConfig;
use district_stats::stats::InMemoryDistrictStore;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local store; starts offline when persistence is disabled so every query
/// takes the fallback path.
pub(crate) fn build_store(config: &StoreConfig) -> InMemoryDistrictStore {
    if config.enabled {
        InMemoryDistrictStore::default()
    } else {
        InMemoryDistrictStore::unreachable()
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
