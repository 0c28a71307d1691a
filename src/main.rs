use mini_ai_chat::{build_app, AppConfig, AppState};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();
    if config.api_token.is_empty() {
        warn!("HF_TOKEN is not set; chat requests will fail until it is provided");
    }

    let port = config.port;
    let state = AppState::new(config);
    let app = build_app(state);

    mini_ai_chat::run_server(app, port).await
}
