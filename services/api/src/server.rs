use crate::cli::ServeArgs;
use crate::infra::{AppState, BaselineSelection, FiscalContext};
use crate::routes::fiscal_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use bggov_fiscal::config::AppConfig;
use bggov_fiscal::error::AppError;
use bggov_fiscal::telemetry;
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

    let baseline = BaselineSelection::from_dir(config.fiscal.budget_dir.as_deref())?;
    info!(source = ?baseline.source, "fiscal baseline loaded");

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        fiscal: Arc::new(FiscalContext::new(baseline, config.fiscal.currency)),
    };

    let app = fiscal_routes()
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "fiscal scenario service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
