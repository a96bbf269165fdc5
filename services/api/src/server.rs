use crate::cli::ServeArgs;
use crate::infra::{load_desk, share, AppState};
use crate::routes::with_fleet_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use chrono::Utc;
use fleet_desk::config::AppConfig;
use fleet_desk::error::AppError;
use fleet_desk::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

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
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let desk = load_desk(config.fleet.seed_csv.as_deref(), Utc::now())?;
    let statistics = desk.statistics();
    info!(
        vehicles = statistics.total_vehicles,
        rented = statistics.rented,
        "fleet desk loaded"
    );

    let app = with_fleet_routes(share(desk))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "fleet desk ready");

    axum::serve(listener, app).await?;
    Ok(())
}
