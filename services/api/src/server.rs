use crate::cli::ServeArgs;
use crate::infra::{build_store, AppState};
use crate::routes::with_operational_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use district_stats::config::{AppConfig, ServerConfig};
use district_stats::error::AppError;
use district_stats::stats::{
    seed_fallback_dataset, DistrictStatsService, FallbackGenerator, InMemoryDistrictStore,
};
use district_stats::telemetry;
use std::io::ErrorKind;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = Arc::new(build_store(&config.store));
    let service = DistrictStatsService::new(store.clone(), config.cache.ttl, config.store.timeout)
        .with_internal_error_details(config.environment.exposes_internal_errors());
    if config.store.enabled && config.store.seed_on_start {
        seed_if_empty(&store, &service).await?;
    }

    let app = with_operational_routes(Arc::new(service))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let listener = bind_with_retries(&config.server).await?;
    let addr = listener.local_addr()?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "district statistics service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

async fn seed_if_empty(
    store: &InMemoryDistrictStore,
    service: &DistrictStatsService<InMemoryDistrictStore>,
) -> Result<(), AppError> {
    if !store.is_empty() {
        return Ok(());
    }

    let period = service.reporting_period();
    let report = seed_fallback_dataset(store, &FallbackGenerator::new(), None, &period).await?;
    info!(
        records = report.total_records(),
        states = report.states.len(),
        month = %period.month_year,
        "seeded empty store with sample data"
    );
    Ok(())
}

/// Binds the configured port, moving to the next one while it is in use.
async fn bind_with_retries(server: &ServerConfig) -> Result<TcpListener, AppError> {
    let mut port = server.port;
    let mut attempts_left = server.port_retries;

    loop {
        let addr = server.socket_addr_for(port)?;
        match TcpListener::bind(addr).await {
            Ok(listener) => return Ok(listener),
            Err(err) if err.kind() == ErrorKind::AddrInUse && attempts_left > 0 => {
                warn!(%addr, "port in use, trying the next one");
                attempts_left -= 1;
                port = port.checked_add(1).ok_or(err)?;
            }
            Err(err) => return Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loopback(port: u16, port_retries: u16) -> ServerConfig {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port,
            port_retries,
        }
    }

    #[tokio::test]
    async fn taken_port_moves_to_the_next_one() {
        let taken = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let port = taken.local_addr().expect("addr").port();

        match bind_with_retries(&loopback(port, 3)).await {
            Ok(listener) => {
                let bound = listener.local_addr().expect("addr").port();
                assert!(bound > port && bound <= port.saturating_add(3));
            }
            // Every following port was also taken on this machine.
            Err(AppError::Io(err)) => assert_eq!(err.kind(), ErrorKind::AddrInUse),
            Err(other) => panic!("unexpected error {other}"),
        }
    }

    #[tokio::test]
    async fn taken_port_without_retries_fails() {
        let taken = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let port = taken.local_addr().expect("addr").port();

        let result = bind_with_retries(&loopback(port, 0)).await;
        assert!(matches!(result, Err(AppError::Io(err)) if err.kind() == ErrorKind::AddrInUse));
    }

    #[tokio::test]
    async fn seeding_only_fills_an_empty_store() {
        let store = Arc::new(InMemoryDistrictStore::default());
        let service = DistrictStatsService::new(
            store.clone(),
            std::time::Duration::from_secs(60),
            std::time::Duration::from_millis(50),
        );

        seed_if_empty(&store, &service).await.expect("seed");
        let seeded = store.len();
        seed_if_empty(&store, &service).await.expect("second call");

        assert!(seeded > 0);
        assert_eq!(store.len(), seeded);
    }
}
