//! Routes 模块
//!
//! 定义 API 路由。

pub mod env_routes;
pub mod settings_routes;
