//! 配置管理模块
//!
//! 提供服务配置加载和管理功能，支持 TOML 配置文件和环境变量覆盖，
//! 并负责按层加载 web 应用的环境设置。

pub mod config;
pub mod loader;
