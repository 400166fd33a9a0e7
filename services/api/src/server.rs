use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryTripHistory};
use crate::routes::with_scoring_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use fleet_inspect::config::AppConfig;
use fleet_inspect::scoring::ScoringService;
use fleet_inspect::telemetry;
use fleet_inspect::AppError;
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

    let history = Arc::new(InMemoryTripHistory::load(args.history_csv.as_deref())?);
    info!(records = history.len(), "trip history loaded");
    let scoring_service = Arc::new(ScoringService::new(history, config.scoring.clone()));

    let app = with_scoring_routes(scoring_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        absent_critical_fails = config.scoring.absent_critical_section_fails,
        rolling_window_days = config.scoring.rolling_window_days,
        "inspection scoring service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
