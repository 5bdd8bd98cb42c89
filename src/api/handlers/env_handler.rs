use axum::{
    Json,
    extract::State,
    http::header,
    response::IntoResponse,
};
use tracing::debug;

use crate::api::app_state::AppState;

/// 下发 env.js
pub async fn serve_env_js(State(state): State<AppState>) -> impl IntoResponse {
    debug!("Serving env.js");
    state.metrics.record_env_js_served();

    (
        [
            (header::CONTENT_TYPE, "application/javascript; charset=utf-8"),
            (header::CACHE_CONTROL, "no-store"),
        ],
        state.env_js.to_string(),
    )
}

/// 以 JSON 返回完整设置
pub async fn env_json(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CACHE_CONTROL, "no-store")],
        Json(state.settings.as_ref().clone()),
    )
}
