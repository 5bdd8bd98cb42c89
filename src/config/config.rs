use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// 服务地址
    pub host: String,
    /// 服务端口
    pub port: u16,
    /// 允许跨域访问的来源，为空时不启用 CORS
    pub cors_origins: Vec<String>,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: String,
    /// 结构化日志格式
    pub structured: bool,
    /// 日志文件目录
    pub log_dir: Option<PathBuf>,
}

/// 设置来源配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SourcesConfig {
    /// TOML 设置文件
    pub settings_file: Option<PathBuf>,
    /// 需要导入的既有 env.js
    pub env_js_file: Option<PathBuf>,
    /// 是否读取 `MIFOS_*` 环境变量
    pub env_overrides: bool,
}

/// 服务配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// 服务器配置
    pub server: ServerConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 设置来源
    pub sources: SourcesConfig,
    /// 应用名称
    pub app_name: String,
    /// 环境
    pub environment: String,
    /// 设置后只渲染 env.js 到该路径并退出，不启动服务
    pub render_to: Option<PathBuf>,
}

impl ServiceConfig {
    /// 创建开发环境配置
    pub fn development() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".into(),
                port: 4200,
                cors_origins: vec!["http://localhost:4200".into()],
            },
            logging: LoggingConfig {
                level: "debug".into(),
                structured: false,
                log_dir: None,
            },
            sources: SourcesConfig {
                settings_file: Some(PathBuf::from("mifos-settings.toml")),
                env_js_file: None,
                env_overrides: true,
            },
            app_name: "mifos-env".into(),
            environment: "development".into(),
            render_to: None,
        }
    }

    /// 创建生产环境配置
    pub fn production() -> Self {
        let mut config = Self::development();
        config.environment = "production".into();
        config.logging.level = "info".into();
        config.logging.structured = true;
        config.server.cors_origins.clear();
        config
    }
}
