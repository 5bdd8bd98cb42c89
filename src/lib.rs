//! mifos-env - Mifos web 应用环境设置服务
//!
//! 将 web 应用启动时读取的 `window.env` 设置建模为带类型、在加载时校验的
//! 配置记录，并通过 HTTP 以 `assets/env.js` 的形式下发。

pub mod api;
pub mod config;
pub mod error;
pub mod observability;
pub mod security;
pub mod settings;
