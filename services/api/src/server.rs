use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::form_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use crvs_forms::config::AppConfig;
use crvs_forms::error::AppError;
use crvs_forms::forms::build_forms;
use crvs_forms::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
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

    let forms = build_forms(&config.forms).await?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        forms: Arc::new(forms),
    };

    let app = form_routes()
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "registration form service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
