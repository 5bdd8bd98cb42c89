//! 环境设置存储
//!
//! 与 web 应用 `window.env` 一一对应的字符串设置集合。启动时构建一次，
//! 之后以只读方式共享给各个消费者。

use serde::{Deserialize, Serialize};

use crate::settings::error::SettingsError;
use crate::settings::keys::SettingKey;

/// 环境设置
///
/// Every recognized key is a field, so a loaded value always carries the
/// full key set. Empty strings are valid values and mean "use the
/// built-in default" to consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EnvSettings {
    pub fineract_api_urls: String,
    pub fineract_api_url: String,
    pub api_provider: String,
    pub api_version: String,
    pub fineract_platform_tenant_id: String,
    pub fineract_platform_tenant_ids: String,
    pub default_language: String,
    pub supported_languages: String,
    pub preload_clients: String,
    pub default_char_delimiter: String,
    pub display_back_end_info: String,
    pub display_tenant_selector: String,
    pub wait_time_for_notifications: String,
    #[serde(rename = "waitTimeForCOBCatchUp")]
    pub wait_time_for_cob_catch_up: String,
    pub session_idle_timeout: String,
    pub oauth_server_enabled: String,
    pub oauth_server_url: String,
    pub oauth_app_id: String,
}

impl Default for EnvSettings {
    fn default() -> Self {
        Self::bundled()
    }
}

impl EnvSettings {
    /// 随 web 应用一起发布的默认设置
    pub fn bundled() -> Self {
        Self {
            fineract_api_urls: "http://localhost:8080".into(),
            fineract_api_url: "http://localhost:8080".into(),
            api_provider: "/fineract-provider/api".into(),
            api_version: "/v1".into(),
            fineract_platform_tenant_id: "default".into(),
            fineract_platform_tenant_ids: "default".into(),
            default_language: "en-US".into(),
            supported_languages:
                "cs-CS,de-DE,en-US,es-MX,fr-FR,it-IT,ko-KO,li-LI,lv-LV,ne-NE,pt-PT,sw-SW".into(),
            preload_clients: "true".into(),
            default_char_delimiter: ",".into(),
            display_back_end_info: "true".into(),
            display_tenant_selector: String::new(),
            wait_time_for_notifications: String::new(),
            wait_time_for_cob_catch_up: String::new(),
            session_idle_timeout: "0".into(),
            oauth_server_enabled: String::new(),
            oauth_server_url: String::new(),
            oauth_app_id: String::new(),
        }
    }

    /// 按键读取原始值
    pub fn get(&self, key: SettingKey) -> &str {
        match key {
            SettingKey::FineractApiUrls => &self.fineract_api_urls,
            SettingKey::FineractApiUrl => &self.fineract_api_url,
            SettingKey::ApiProvider => &self.api_provider,
            SettingKey::ApiVersion => &self.api_version,
            SettingKey::FineractPlatformTenantId => &self.fineract_platform_tenant_id,
            SettingKey::FineractPlatformTenantIds => &self.fineract_platform_tenant_ids,
            SettingKey::DefaultLanguage => &self.default_language,
            SettingKey::SupportedLanguages => &self.supported_languages,
            SettingKey::PreloadClients => &self.preload_clients,
            SettingKey::DefaultCharDelimiter => &self.default_char_delimiter,
            SettingKey::DisplayBackEndInfo => &self.display_back_end_info,
            SettingKey::DisplayTenantSelector => &self.display_tenant_selector,
            SettingKey::WaitTimeForNotifications => &self.wait_time_for_notifications,
            SettingKey::WaitTimeForCobCatchUp => &self.wait_time_for_cob_catch_up,
            SettingKey::SessionIdleTimeout => &self.session_idle_timeout,
            SettingKey::OauthServerEnabled => &self.oauth_server_enabled,
            SettingKey::OauthServerUrl => &self.oauth_server_url,
            SettingKey::OauthAppId => &self.oauth_app_id,
        }
    }

    /// 读取值，空值时返回该键的内置默认值
    pub fn get_or_default(&self, key: SettingKey) -> &str {
        let value = self.get(key);
        if value.is_empty() {
            key.fallback().unwrap_or(value)
        } else {
            value
        }
    }

    /// 按 `window.env` 中的名称读取，未知名称返回 `None`
    pub fn lookup(&self, name: &str) -> Option<&str> {
        name.parse::<SettingKey>().ok().map(|key| self.get(key))
    }

    /// 按声明顺序遍历所有键值
    pub fn iter(&self) -> impl Iterator<Item = (SettingKey, &str)> + '_ {
        SettingKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }

    /// Returns a copy with one value replaced.
    pub fn with_value(mut self, key: SettingKey, value: impl Into<String>) -> Self {
        *self.slot_mut(key) = value.into();
        self
    }

    fn slot_mut(&mut self, key: SettingKey) -> &mut String {
        match key {
            SettingKey::FineractApiUrls => &mut self.fineract_api_urls,
            SettingKey::FineractApiUrl => &mut self.fineract_api_url,
            SettingKey::ApiProvider => &mut self.api_provider,
            SettingKey::ApiVersion => &mut self.api_version,
            SettingKey::FineractPlatformTenantId => &mut self.fineract_platform_tenant_id,
            SettingKey::FineractPlatformTenantIds => &mut self.fineract_platform_tenant_ids,
            SettingKey::DefaultLanguage => &mut self.default_language,
            SettingKey::SupportedLanguages => &mut self.supported_languages,
            SettingKey::PreloadClients => &mut self.preload_clients,
            SettingKey::DefaultCharDelimiter => &mut self.default_char_delimiter,
            SettingKey::DisplayBackEndInfo => &mut self.display_back_end_info,
            SettingKey::DisplayTenantSelector => &mut self.display_tenant_selector,
            SettingKey::WaitTimeForNotifications => &mut self.wait_time_for_notifications,
            SettingKey::WaitTimeForCobCatchUp => &mut self.wait_time_for_cob_catch_up,
            SettingKey::SessionIdleTimeout => &mut self.session_idle_timeout,
            SettingKey::OauthServerEnabled => &mut self.oauth_server_enabled,
            SettingKey::OauthServerUrl => &mut self.oauth_server_url,
            SettingKey::OauthAppId => &mut self.oauth_app_id,
        }
    }

    /// 校验存储层不变量
    ///
    /// Checks that the API URL is set, that each alias pair agrees and that
    /// the effective default language is one of the supported languages.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.fineract_api_urls.trim().is_empty() {
            return Err(SettingsError::MissingValue {
                key: SettingKey::FineractApiUrls.as_str(),
            });
        }

        for (key, alias) in SettingKey::ALIAS_PAIRS {
            let (value, alias_value) = (self.get(key), self.get(alias));
            if value != alias_value {
                return Err(SettingsError::AliasMismatch {
                    key: key.as_str(),
                    alias: alias.as_str(),
                    value: value.to_string(),
                    alias_value: alias_value.to_string(),
                });
            }
        }

        let language = self.get_or_default(SettingKey::DefaultLanguage).trim();
        let supported = self.get_or_default(SettingKey::SupportedLanguages);
        if !supported.split(',').map(str::trim).any(|l| l == language) {
            return Err(SettingsError::UnsupportedDefaultLanguage {
                language: language.to_string(),
                supported: supported.to_string(),
            });
        }

        Ok(())
    }
}
