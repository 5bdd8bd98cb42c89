//! 设置 DTO
//!
//! 定义设置查询相关的响应数据结构。

use serde::{Deserialize, Serialize};

use crate::settings::{EnvSettings, SettingKey, ValueKind};

/// 单项设置响应
#[derive(Debug, Serialize, Deserialize)]
pub struct SettingResponse {
    /// `window.env` 中的名称
    pub key: String,
    /// 原始值
    pub value: String,
    /// 空值时回退后的有效值
    pub effective: String,
    /// 语义类型
    pub kind: ValueKind,
    /// 别名键
    pub alias: Option<String>,
    /// 覆盖该键的环境变量
    pub env_var: String,
}

impl SettingResponse {
    pub fn from_settings(settings: &EnvSettings, key: SettingKey) -> Self {
        Self {
            key: key.as_str().to_string(),
            value: settings.get(key).to_string(),
            effective: settings.get_or_default(key).to_string(),
            kind: key.kind(),
            alias: key.alias().map(|a| a.as_str().to_string()),
            env_var: key.env_var().to_string(),
        }
    }
}

/// 设置列表响应
#[derive(Debug, Serialize, Deserialize)]
pub struct SettingsListResponse {
    pub settings: Vec<SettingResponse>,
    pub total: usize,
}
