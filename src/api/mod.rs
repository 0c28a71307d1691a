mod handlers;
mod models;

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue},
    middleware,
    routing::get,
    Router,
};
use tower_http::{
    services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};

use crate::AppState;

pub use models::{AskForm, HealthResponse};

pub fn router(state: Arc<AppState>) -> Router {
    let chat = Router::new()
        .route("/chat", get(handlers::chat_form).post(handlers::chat_submit))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            handlers::rate_limit,
        ));

    Router::new()
        .merge(chat)
        .route(
            "/legacy",
            get(handlers::legacy_form).post(handlers::legacy_submit),
        )
        .route("/healthz", get(handlers::healthz))
        .fallback_service(ServeDir::new(&state.config.assets_dir))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
