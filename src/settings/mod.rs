//! 环境设置模块
//!
//! Web 应用在启动时读取的 `window.env` 设置：键定义、字符串存储、类型化视图、
//! env.js 编解码以及加载时使用的配置源。

pub mod envjs;
pub mod error;
pub mod keys;
pub mod sources;
pub mod store;
pub mod typed;

pub use error::SettingsError;
pub use keys::{SettingKey, ValueKind};
pub use store::EnvSettings;
pub use typed::{ApiConfig, OAuthConfig, WebAppConfig};
