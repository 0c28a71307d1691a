use std::env;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "deepseek-ai/DeepSeek-V3";
pub const DEFAULT_UPSTREAM_URL: &str = "https://router.huggingface.co/v1";

/// Immutable application configuration, read once at startup and passed
/// explicitly to the router and upstream client.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_token: String,
    pub model: String,
    pub upstream_url: String,
    pub port: u16,
    pub assets_dir: String,
    pub rate_limit_window: Duration,
    pub rate_limit_max: u32,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let api_token = env::var("HF_TOKEN").unwrap_or_default();

        let model = env::var("MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let upstream_url =
            env::var("UPSTREAM_URL").unwrap_or_else(|_| DEFAULT_UPSTREAM_URL.to_string());

        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(10_000);

        let assets_dir = env::var("ASSETS_DIR").unwrap_or_else(|_| "public".to_string());

        let rate_limit_window = env::var("RATE_LIMIT_WINDOW_MS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or_else(|| Duration::from_secs(60));

        let rate_limit_max = env::var("RATE_LIMIT_MAX")
            .ok()
            .and_then(|value| value.parse::<u32>().ok())
            .unwrap_or(25);

        Self {
            api_token,
            model,
            upstream_url: upstream_url.trim_end_matches('/').to_string(),
            port,
            assets_dir,
            rate_limit_window,
            rate_limit_max,
        }
    }
}
