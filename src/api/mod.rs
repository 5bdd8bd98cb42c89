//! API 模块
//!
//! 提供 env.js 下发与设置查询的 HTTP 接口。

#[cfg(test)]
mod api_tests;
pub mod app_state;
pub mod dto;
pub mod handlers;
pub mod routes;

use crate::api::app_state::AppState;
use crate::security::middleware::security_headers_middleware;
use axum::{
    Router,
    http::{HeaderValue, Method},
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

pub fn create_router(app_state: AppState) -> Router {
    let api = Router::new().merge(routes::settings_routes::create_settings_router());

    Router::new()
        .merge(routes::env_routes::create_env_router())
        .nest("/api/v1", api)
        // Add security headers middleware to all routes
        .layer(axum::middleware::from_fn(security_headers_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// 按配置的来源列表构建 CORS 层，列表为空时返回 `None`
pub fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    if allowed.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods([Method::GET, Method::HEAD]),
    )
}
