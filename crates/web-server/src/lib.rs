use analytics::{ReportCache, ReportPipeline};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use configuration::Config;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

use error::AppError;

/// The shared application state that all handlers can access.
pub struct AppState {
    pub pipeline: ReportPipeline,
    pub cache: Mutex<ReportCache>,
}

/// Builds the router with every route and middleware layer.
pub fn app(config: &Config) -> Result<Router, AppError> {
    let app_state = Arc::new(AppState {
        pipeline: ReportPipeline::from_config(config)?,
        cache: Mutex::new(ReportCache::new(config.report.cache_capacity)),
    });

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any());

    let router = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/report", post(handlers::create_report))
        .with_state(app_state)
        .layer(cors)
        // Logs information about every incoming request.
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(config.server.body_limit_bytes));

    Ok(router)
}

/// Configures and runs the upload server until it is shut down.
pub async fn run_server(config: Config) -> anyhow::Result<()> {
    // Tracing is initialized by the binary; this only emits events.
    let addr: SocketAddr = config.server.addr.parse()?;
    let app = app(&config)?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Web server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
