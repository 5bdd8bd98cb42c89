//! 设置键定义
//!
//! 固定的键集合、每个键的环境变量名、语义类型以及空值时的内置默认值。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::settings::error::SettingsError;

/// Locales offered when `supportedLanguages` is left empty.
pub const BUNDLED_LANGUAGES: &str =
    "cs-CS,de-DE,en-US,es-MX,fr-FR,it-IT,ko-KO,li-LI,lv-LV,ne-NE,pt-PT,sw-SW";

/// Delimiters the CSV export accepts.
pub const ALLOWED_DELIMITERS: [char; 4] = [',', ';', '|', ' '];

/// How consumers interpret the string stored under a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    UrlList,
    Url,
    PathSegment,
    Text,
    TextList,
    LocaleTag,
    LocaleList,
    Boolean,
    Delimiter,
    Seconds,
    Milliseconds,
}

/// A recognized configuration key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SettingKey {
    #[serde(rename = "fineractApiUrls")]
    FineractApiUrls,
    #[serde(rename = "fineractApiUrl")]
    FineractApiUrl,
    #[serde(rename = "apiProvider")]
    ApiProvider,
    #[serde(rename = "apiVersion")]
    ApiVersion,
    #[serde(rename = "fineractPlatformTenantId")]
    FineractPlatformTenantId,
    #[serde(rename = "fineractPlatformTenantIds")]
    FineractPlatformTenantIds,
    #[serde(rename = "defaultLanguage")]
    DefaultLanguage,
    #[serde(rename = "supportedLanguages")]
    SupportedLanguages,
    #[serde(rename = "preloadClients")]
    PreloadClients,
    #[serde(rename = "defaultCharDelimiter")]
    DefaultCharDelimiter,
    #[serde(rename = "displayBackEndInfo")]
    DisplayBackEndInfo,
    #[serde(rename = "displayTenantSelector")]
    DisplayTenantSelector,
    #[serde(rename = "waitTimeForNotifications")]
    WaitTimeForNotifications,
    #[serde(rename = "waitTimeForCOBCatchUp")]
    WaitTimeForCobCatchUp,
    #[serde(rename = "sessionIdleTimeout")]
    SessionIdleTimeout,
    #[serde(rename = "oauthServerEnabled")]
    OauthServerEnabled,
    #[serde(rename = "oauthServerUrl")]
    OauthServerUrl,
    #[serde(rename = "oauthAppId")]
    OauthAppId,
}

impl SettingKey {
    /// Every key, in the order the web app's env.js declares them.
    pub const ALL: [SettingKey; 18] = [
        SettingKey::FineractApiUrls,
        SettingKey::FineractApiUrl,
        SettingKey::ApiProvider,
        SettingKey::ApiVersion,
        SettingKey::FineractPlatformTenantId,
        SettingKey::FineractPlatformTenantIds,
        SettingKey::DefaultLanguage,
        SettingKey::SupportedLanguages,
        SettingKey::PreloadClients,
        SettingKey::DefaultCharDelimiter,
        SettingKey::DisplayBackEndInfo,
        SettingKey::DisplayTenantSelector,
        SettingKey::WaitTimeForNotifications,
        SettingKey::WaitTimeForCobCatchUp,
        SettingKey::SessionIdleTimeout,
        SettingKey::OauthServerEnabled,
        SettingKey::OauthServerUrl,
        SettingKey::OauthAppId,
    ];

    /// Backward-compatible alias pairs that must hold the same value.
    pub const ALIAS_PAIRS: [(SettingKey, SettingKey); 2] = [
        (SettingKey::FineractApiUrls, SettingKey::FineractApiUrl),
        (
            SettingKey::FineractPlatformTenantId,
            SettingKey::FineractPlatformTenantIds,
        ),
    ];

    /// Name under `window.env` and in JSON/TOML documents.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FineractApiUrls => "fineractApiUrls",
            Self::FineractApiUrl => "fineractApiUrl",
            Self::ApiProvider => "apiProvider",
            Self::ApiVersion => "apiVersion",
            Self::FineractPlatformTenantId => "fineractPlatformTenantId",
            Self::FineractPlatformTenantIds => "fineractPlatformTenantIds",
            Self::DefaultLanguage => "defaultLanguage",
            Self::SupportedLanguages => "supportedLanguages",
            Self::PreloadClients => "preloadClients",
            Self::DefaultCharDelimiter => "defaultCharDelimiter",
            Self::DisplayBackEndInfo => "displayBackEndInfo",
            Self::DisplayTenantSelector => "displayTenantSelector",
            Self::WaitTimeForNotifications => "waitTimeForNotifications",
            Self::WaitTimeForCobCatchUp => "waitTimeForCOBCatchUp",
            Self::SessionIdleTimeout => "sessionIdleTimeout",
            Self::OauthServerEnabled => "oauthServerEnabled",
            Self::OauthServerUrl => "oauthServerUrl",
            Self::OauthAppId => "oauthAppId",
        }
    }

    /// Environment variable that overrides this key at load time.
    pub const fn env_var(self) -> &'static str {
        match self {
            Self::FineractApiUrls => "MIFOS_FINERACT_API_URLS",
            Self::FineractApiUrl => "MIFOS_FINERACT_API_URL",
            Self::ApiProvider => "MIFOS_API_PROVIDER",
            Self::ApiVersion => "MIFOS_API_VERSION",
            Self::FineractPlatformTenantId => "MIFOS_FINERACT_PLATFORM_TENANT_ID",
            Self::FineractPlatformTenantIds => "MIFOS_FINERACT_PLATFORM_TENANT_IDS",
            Self::DefaultLanguage => "MIFOS_DEFAULT_LANGUAGE",
            Self::SupportedLanguages => "MIFOS_SUPPORTED_LANGUAGES",
            Self::PreloadClients => "MIFOS_PRELOAD_CLIENTS",
            Self::DefaultCharDelimiter => "MIFOS_DEFAULT_CHAR_DELIMITER",
            Self::DisplayBackEndInfo => "MIFOS_DISPLAY_BACK_END_INFO",
            Self::DisplayTenantSelector => "MIFOS_DISPLAY_TENANT_SELECTOR",
            Self::WaitTimeForNotifications => "MIFOS_WAIT_TIME_FOR_NOTIFICATIONS",
            Self::WaitTimeForCobCatchUp => "MIFOS_WAIT_TIME_FOR_COB_CATCH_UP",
            Self::SessionIdleTimeout => "MIFOS_SESSION_IDLE_TIMEOUT",
            Self::OauthServerEnabled => "MIFOS_OAUTH_SERVER_ENABLED",
            Self::OauthServerUrl => "MIFOS_OAUTH_SERVER_URL",
            Self::OauthAppId => "MIFOS_OAUTH_APP_ID",
        }
    }

    pub const fn kind(self) -> ValueKind {
        match self {
            Self::FineractApiUrls | Self::FineractApiUrl => ValueKind::UrlList,
            Self::ApiProvider | Self::ApiVersion => ValueKind::PathSegment,
            Self::FineractPlatformTenantId | Self::FineractPlatformTenantIds => {
                ValueKind::TextList
            }
            Self::DefaultLanguage => ValueKind::LocaleTag,
            Self::SupportedLanguages => ValueKind::LocaleList,
            Self::PreloadClients
            | Self::DisplayBackEndInfo
            | Self::DisplayTenantSelector
            | Self::OauthServerEnabled => ValueKind::Boolean,
            Self::DefaultCharDelimiter => ValueKind::Delimiter,
            Self::WaitTimeForNotifications | Self::WaitTimeForCobCatchUp => ValueKind::Seconds,
            Self::SessionIdleTimeout => ValueKind::Milliseconds,
            Self::OauthServerUrl => ValueKind::Url,
            Self::OauthAppId => ValueKind::Text,
        }
    }

    /// Built-in value consumers fall back to when the stored value is empty.
    ///
    /// `None` means the empty string is itself the effective value.
    pub const fn fallback(self) -> Option<&'static str> {
        match self {
            Self::FineractPlatformTenantId | Self::FineractPlatformTenantIds => Some("default"),
            Self::DefaultLanguage => Some("en-US"),
            Self::SupportedLanguages => Some(BUNDLED_LANGUAGES),
            Self::PreloadClients | Self::DisplayBackEndInfo => Some("true"),
            Self::DefaultCharDelimiter => Some(","),
            Self::DisplayTenantSelector | Self::OauthServerEnabled => Some("false"),
            Self::WaitTimeForNotifications => Some("60"),
            Self::WaitTimeForCobCatchUp => Some("30"),
            // 0 disables the idle timeout
            Self::SessionIdleTimeout => Some("0"),
            Self::FineractApiUrls
            | Self::FineractApiUrl
            | Self::ApiProvider
            | Self::ApiVersion
            | Self::OauthServerUrl
            | Self::OauthAppId => None,
        }
    }

    /// The other half of an alias pair.
    pub fn alias(self) -> Option<SettingKey> {
        Self::ALIAS_PAIRS.iter().find_map(|&(a, b)| {
            if a == self {
                Some(b)
            } else if b == self {
                Some(a)
            } else {
                None
            }
        })
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| SettingsError::UnknownKey(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_and_env_vars_are_unique() {
        let names: HashSet<_> = SettingKey::ALL.iter().map(|k| k.as_str()).collect();
        let vars: HashSet<_> = SettingKey::ALL.iter().map(|k| k.env_var()).collect();
        assert_eq!(names.len(), SettingKey::ALL.len());
        assert_eq!(vars.len(), SettingKey::ALL.len());
    }

    #[test]
    fn test_parse_round_trips_through_name() {
        for key in SettingKey::ALL {
            assert_eq!(key.as_str().parse::<SettingKey>().unwrap(), key);
        }
        assert!(matches!(
            "fineractApiURL".parse::<SettingKey>(),
            Err(SettingsError::UnknownKey(_))
        ));
    }

    #[test]
    fn test_serde_name_matches_wire_name() {
        for key in SettingKey::ALL {
            let json = serde_json::to_string(&key).unwrap();
            assert_eq!(json, format!("\"{}\"", key.as_str()));
        }
    }

    #[test]
    fn test_alias_is_symmetric() {
        assert_eq!(
            SettingKey::FineractApiUrl.alias(),
            Some(SettingKey::FineractApiUrls)
        );
        assert_eq!(
            SettingKey::FineractPlatformTenantId.alias(),
            Some(SettingKey::FineractPlatformTenantIds)
        );
        assert_eq!(SettingKey::ApiVersion.alias(), None);
    }

    #[test]
    fn test_bundled_languages_contain_fallback_language() {
        let default = SettingKey::DefaultLanguage.fallback().unwrap();
        assert!(BUNDLED_LANGUAGES.split(',').any(|l| l == default));
    }
}
