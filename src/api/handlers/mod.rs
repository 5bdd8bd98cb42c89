//! Handlers 模块
//!
//! 定义 API 请求处理器。

pub mod env_handler;
pub mod settings_handler;
