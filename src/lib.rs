pub mod api;
pub mod config;
pub mod rate_limit;
pub mod render;
pub mod upstream;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::Router;
use tracing::info;

pub use config::AppConfig;
use rate_limit::RateLimiter;

/// Outbound requests give up when the transport stalls this long.
const HTTP_TIMEOUT: Duration = Duration::from_secs(60);

pub struct AppState {
    pub config: AppConfig,
    pub http: reqwest::Client,
    pub limiter: RateLimiter,
}

impl AppState {
    pub fn new(config: AppConfig) -> Arc<Self> {
        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");
        let limiter = RateLimiter::new(config.rate_limit_window, config.rate_limit_max);
        Arc::new(Self {
            config,
            http,
            limiter,
        })
    }
}

pub fn build_app(state: Arc<AppState>) -> Router {
    api::router(state)
}

pub async fn run_server(app: Router, port: u16) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("failed to bind port {port}"))?;

    info!("Mini AI Chat listening on port {port}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("server failed")
}
