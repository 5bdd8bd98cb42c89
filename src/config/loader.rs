use crate::config::config::{ServiceConfig, SourcesConfig};
use crate::error::{AppError, Result};
use crate::settings::envjs::{self, EnvJs};
use crate::settings::sources::{AliasMirror, EnvOverrides};
use crate::settings::{EnvSettings, WebAppConfig};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// 服务配置环境变量前缀
pub const SERVICE_ENV_PREFIX: &str = "MIFOS_ENV_";

/// 配置加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 从默认路径加载服务配置
    ///
    /// 搜索路径：
    /// 1. ./mifos-env.toml
    /// 2. 环境变量 `MIFOS_ENV_*`（嵌套字段使用 `__` 分隔）
    pub fn load() -> std::result::Result<ServiceConfig, figment::Error> {
        Self::load_from(default_config_path())
    }

    /// 从指定路径加载服务配置
    pub fn load_from(path: impl AsRef<Path>) -> std::result::Result<ServiceConfig, figment::Error> {
        Figment::from(Serialized::defaults(base_config()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(SERVICE_ENV_PREFIX).split("__"))
            .extract()
    }

    /// 加载环境设置
    ///
    /// Layers, later wins: bundled defaults, the TOML settings file, an
    /// imported env.js, then `MIFOS_*` variables. Each layer that sets one
    /// half of an alias pair sets both.
    pub fn load_settings(sources: &SourcesConfig) -> Result<EnvSettings> {
        let mut figment = Figment::from(Serialized::defaults(EnvSettings::bundled()));

        if let Some(path) = &sources.settings_file {
            debug!("Merging settings file {}", path.display());
            figment = figment.merge(AliasMirror(Toml::file(path)));
        }
        if let Some(path) = &sources.env_js_file {
            debug!("Importing env.js from {}", path.display());
            figment = figment.merge(AliasMirror(EnvJs::file(path)));
        }
        if sources.env_overrides {
            figment = figment.merge(AliasMirror(EnvOverrides));
        }

        let settings: EnvSettings = figment.extract()?;
        settings.validate()?;
        info!(
            "Environment settings loaded: api={}{}{}",
            settings.fineract_api_url, settings.api_provider, settings.api_version
        );
        Ok(settings)
    }

    /// 加载环境设置并转换为类型化配置
    pub fn load_web_app(sources: &SourcesConfig) -> Result<(EnvSettings, WebAppConfig)> {
        let settings = Self::load_settings(sources)?;
        let config = WebAppConfig::from_settings(&settings)?;
        Ok((settings, config))
    }

    /// 只渲染模式：配置了 `render_to` 时写出 env.js
    ///
    /// Returns `true` when the file was written and the service should not start.
    pub fn render_if_requested(config: &ServiceConfig, settings: &EnvSettings) -> Result<bool> {
        let Some(path) = &config.render_to else {
            return Ok(false);
        };
        envjs::write_to(settings, path)?;
        info!("env.js written to {}", path.display());
        Ok(true)
    }

    /// 验证配置
    pub fn validate(config: &ServiceConfig) -> std::result::Result<(), ConfigValidationError> {
        if config.server.port == 0 {
            return Err(ConfigValidationError::InvalidPort);
        }

        if config.server.host.trim().is_empty() {
            return Err(ConfigValidationError::MissingHost);
        }

        if EnvFilter::try_new(&config.logging.level).is_err() {
            return Err(ConfigValidationError::InvalidLogLevel(
                config.logging.level.clone(),
            ));
        }

        for path in [&config.sources.settings_file, &config.sources.env_js_file]
            .into_iter()
            .flatten()
        {
            if path.is_dir() {
                return Err(ConfigValidationError::InvalidPath(
                    path.display().to_string(),
                ));
            }
        }

        Ok(())
    }
}

impl From<ConfigValidationError> for AppError {
    fn from(e: ConfigValidationError) -> Self {
        AppError::Config(e.to_string())
    }
}

fn base_config() -> ServiceConfig {
    match std::env::var(format!("{SERVICE_ENV_PREFIX}ENVIRONMENT")).as_deref() {
        Ok("production") => ServiceConfig::production(),
        _ => ServiceConfig::development(),
    }
}

/// 配置验证错误
#[derive(thiserror::Error, Debug)]
pub enum ConfigValidationError {
    #[error("服务端口无效，必须大于 0")]
    InvalidPort,

    #[error("服务地址未配置")]
    MissingHost,

    #[error("日志级别无效: {0}")]
    InvalidLogLevel(String),

    #[error("配置路径无效: {0}")]
    InvalidPath(String),
}

/// 获取默认配置文件路径
pub fn default_config_path() -> PathBuf {
    PathBuf::from("mifos-env.toml")
}

/// 检查配置文件是否存在
pub fn config_exists() -> bool {
    default_config_path().exists()
}
