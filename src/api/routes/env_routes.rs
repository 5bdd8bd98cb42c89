//! Env Routes
//!
//! web 应用直接加载的脚本与 JSON 文档。

use crate::api::handlers::env_handler::*;
use axum::{Router, routing::get};

use crate::api::app_state::AppState;

/// 创建 env.js 路由器
pub fn create_env_router() -> Router<AppState> {
    Router::new()
        .route("/assets/env.js", get(serve_env_js))
        .route("/env.json", get(env_json))
}
