use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    extract::{ConnectInfo, Form, Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{Html, IntoResponse, Response},
    Json,
};
use tracing::warn;

use crate::render::{render_error, render_page, PageStyle};
use crate::upstream;
use crate::AppState;

use super::models::{AskForm, HealthResponse};

/// Sent to clients that exceed the request cap.
const RATE_LIMIT_MESSAGE: &str = "Too many requests, slow down.";

pub async fn chat_form() -> Html<String> {
    Html(render_page(PageStyle::Full, "", None))
}

pub async fn legacy_form() -> Html<String> {
    Html(render_page(PageStyle::Legacy, "", None))
}

pub async fn chat_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<AskForm>,
) -> Response {
    let question = form.q.trim();
    if question.is_empty() {
        return Html(render_page(PageStyle::Full, "", None)).into_response();
    }
    answer_page(&state, question, PageStyle::Full).await
}

pub async fn legacy_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<AskForm>,
) -> Response {
    let question = form.q.trim();
    if question.is_empty() {
        // Legacy clients get a redirect back to the empty form.
        return (StatusCode::FOUND, [(header::LOCATION, "/legacy")]).into_response();
    }
    answer_page(&state, question, PageStyle::Legacy).await
}

/// Shared submit path for both page variants. Upstream failures are rendered
/// to the requester; empty input never reaches here.
async fn answer_page(state: &AppState, question: &str, style: PageStyle) -> Response {
    match upstream::complete(&state.http, &state.config, question).await {
        Ok(answer) => Html(render_page(style, question, Some(&answer))).into_response(),
        Err(err) => {
            warn!("upstream completion failed: {err}");
            Html(render_error(&err.to_string())).into_response()
        }
    }
}

pub async fn healthz() -> Json<HealthResponse> {
    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0);
    Json(HealthResponse { status: "ok", ts })
}

/// Per-client fixed-window rate limit, applied to the chat routes only.
pub async fn rate_limit(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let key = client_key(&request);
    if !state.limiter.try_acquire(&key).await {
        return (StatusCode::TOO_MANY_REQUESTS, RATE_LIMIT_MESSAGE).into_response();
    }
    next.run(request).await
}

/// The service runs behind a platform proxy, so the peer address alone would
/// collapse every client into the proxy's IP. Prefer the first
/// `X-Forwarded-For` entry, then the socket peer; requests with neither
/// (in-process tests) share one bucket.
fn client_key(request: &Request) -> String {
    request
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|ip| ip.trim().to_string())
        .filter(|ip| !ip.is_empty())
        .or_else(|| {
            request
                .extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|info| info.0.ip().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}
