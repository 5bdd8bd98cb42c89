//! 类型化配置
//!
//! 在加载时把字符串设置一次性转换为带类型的配置记录，格式错误的值在启动阶段即被拒绝。

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::time::Duration;
use url::Url;

use crate::settings::error::SettingsError;
use crate::settings::keys::{ALLOWED_DELIMITERS, SettingKey};
use crate::settings::store::EnvSettings;

static LOCALE_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]{2,3}(-[A-Za-z0-9]{2,8})*$").expect("valid locale regex"));

/// 后端 API 端点配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiConfig {
    /// 后端基础地址
    pub base_urls: Vec<Url>,
    /// API 路径前缀
    pub provider: String,
    /// API 版本前缀
    pub version: String,
    /// `base_urls` joined with `provider + version`
    pub endpoints: Vec<Url>,
}

impl ApiConfig {
    /// `apiProvider + apiVersion`
    pub fn root(&self) -> String {
        format!("{}{}", self.provider, self.version)
    }

    /// 第一个后端地址对应的完整 API 端点
    pub fn primary_endpoint(&self) -> &Url {
        // from_settings guarantees at least one base url
        &self.endpoints[0]
    }
}

/// OAuth 配置，仅在启用时存在
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OAuthConfig {
    pub server_url: Url,
    pub app_id: String,
}

/// Web 应用配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebAppConfig {
    pub api: ApiConfig,
    pub tenant_ids: Vec<String>,
    pub default_language: String,
    pub supported_languages: Vec<String>,
    pub preload_clients: bool,
    pub csv_delimiter: char,
    pub display_backend_info: bool,
    pub display_tenant_selector: bool,
    #[serde(serialize_with = "as_secs")]
    pub notification_poll_interval: Duration,
    #[serde(serialize_with = "as_secs")]
    pub cob_catch_up_poll_interval: Duration,
    /// `None` when no idle timeout is enforced
    #[serde(serialize_with = "as_opt_millis")]
    pub session_idle_timeout: Option<Duration>,
    pub oauth: Option<OAuthConfig>,
}

impl WebAppConfig {
    /// 从字符串设置构建类型化配置
    pub fn from_settings(settings: &EnvSettings) -> Result<Self, SettingsError> {
        settings.validate()?;

        let api = parse_api(settings)?;

        let tenant_ids = parse_list(settings.get_or_default(SettingKey::FineractPlatformTenantIds));

        let default_language = settings
            .get_or_default(SettingKey::DefaultLanguage)
            .trim()
            .to_string();
        check_locale(SettingKey::DefaultLanguage, &default_language)?;
        let supported_languages =
            parse_list(settings.get_or_default(SettingKey::SupportedLanguages));
        for language in &supported_languages {
            check_locale(SettingKey::SupportedLanguages, language)?;
        }

        let oauth = if flag(settings, SettingKey::OauthServerEnabled)? {
            Some(parse_oauth(settings)?)
        } else {
            None
        };

        let idle_millis = count(settings, SettingKey::SessionIdleTimeout)?;

        Ok(Self {
            api,
            tenant_ids,
            default_language,
            supported_languages,
            preload_clients: flag(settings, SettingKey::PreloadClients)?,
            csv_delimiter: parse_delimiter(settings)?,
            display_backend_info: flag(settings, SettingKey::DisplayBackEndInfo)?,
            display_tenant_selector: flag(settings, SettingKey::DisplayTenantSelector)?,
            notification_poll_interval: Duration::from_secs(count(
                settings,
                SettingKey::WaitTimeForNotifications,
            )?),
            cob_catch_up_poll_interval: Duration::from_secs(count(
                settings,
                SettingKey::WaitTimeForCobCatchUp,
            )?),
            session_idle_timeout: (idle_millis > 0).then(|| Duration::from_millis(idle_millis)),
            oauth,
        })
    }

    pub fn oauth_enabled(&self) -> bool {
        self.oauth.is_some()
    }
}

fn parse_api(settings: &EnvSettings) -> Result<ApiConfig, SettingsError> {
    let key = SettingKey::FineractApiUrls;
    let base_urls = parse_list(settings.get(key))
        .iter()
        .map(|raw| parse_url(key, raw))
        .collect::<Result<Vec<_>, _>>()?;
    if base_urls.is_empty() {
        return Err(SettingsError::MissingValue { key: key.as_str() });
    }

    let provider = settings.get(SettingKey::ApiProvider).trim().to_string();
    let version = settings.get(SettingKey::ApiVersion).trim().to_string();
    let root = format!("{provider}{version}");

    let endpoints = base_urls.iter().map(|base| endpoint(base, &root)).collect();

    Ok(ApiConfig {
        base_urls,
        provider,
        version,
        endpoints,
    })
}

/// Appends `root` to the base path, keeping any path prefix on the base.
fn endpoint(base: &Url, root: &str) -> Url {
    let prefix = base.path().strip_suffix('/').unwrap_or(base.path());
    let suffix = root.strip_prefix('/').unwrap_or(root);
    let mut url = base.clone();
    url.set_path(&format!("{prefix}/{suffix}"));
    url
}

fn parse_oauth(settings: &EnvSettings) -> Result<OAuthConfig, SettingsError> {
    let url_key = SettingKey::OauthServerUrl;
    let raw_url = settings.get(url_key).trim();
    if raw_url.is_empty() {
        return Err(SettingsError::MissingValue {
            key: url_key.as_str(),
        });
    }

    let app_id = settings.get(SettingKey::OauthAppId).trim();
    if app_id.is_empty() {
        return Err(SettingsError::MissingValue {
            key: SettingKey::OauthAppId.as_str(),
        });
    }

    Ok(OAuthConfig {
        server_url: parse_url(url_key, raw_url)?,
        app_id: app_id.to_string(),
    })
}

fn parse_delimiter(settings: &EnvSettings) -> Result<char, SettingsError> {
    let key = SettingKey::DefaultCharDelimiter;
    let raw = settings.get_or_default(key);
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if ALLOWED_DELIMITERS.contains(&c) => Ok(c),
        _ => Err(SettingsError::InvalidDelimiter {
            key: key.as_str(),
            value: raw.to_string(),
        }),
    }
}

fn flag(settings: &EnvSettings, key: SettingKey) -> Result<bool, SettingsError> {
    let raw = settings.get_or_default(key).trim();
    if raw.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(SettingsError::InvalidBoolean {
            key: key.as_str(),
            value: raw.to_string(),
        })
    }
}

fn count(settings: &EnvSettings, key: SettingKey) -> Result<u64, SettingsError> {
    let raw = settings.get_or_default(key).trim();
    raw.parse::<u64>()
        .map_err(|_| SettingsError::InvalidInteger {
            key: key.as_str(),
            value: raw.to_string(),
        })
}

fn parse_url(key: SettingKey, raw: &str) -> Result<Url, SettingsError> {
    let invalid = |reason: String| SettingsError::InvalidUrl {
        key: key.as_str(),
        value: raw.to_string(),
        reason,
    };
    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme '{other}'"))),
    }
}

fn check_locale(key: SettingKey, tag: &str) -> Result<(), SettingsError> {
    if LOCALE_TAG.is_match(tag) {
        Ok(())
    } else {
        Err(SettingsError::InvalidLocale {
            key: key.as_str(),
            value: tag.to_string(),
        })
    }
}

/// 逗号分隔列表，去除空白与空项
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

fn as_secs<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(value.as_secs())
}

fn as_opt_millis<S: Serializer>(
    value: &Option<Duration>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(duration) => serializer.serialize_some(&(duration.as_millis() as u64)),
        None => serializer.serialize_none(),
    }
}
