//! 设置校验错误

use thiserror::Error;

/// Errors raised while validating or converting environment settings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("'{key}' must be 'true', 'false' or empty, got '{value}'")]
    InvalidBoolean { key: &'static str, value: String },

    #[error("'{key}' must be a non-negative integer, got '{value}'")]
    InvalidInteger { key: &'static str, value: String },

    #[error("'{key}' is not a valid http(s) URL '{value}': {reason}")]
    InvalidUrl {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("'{key}' is required but empty")]
    MissingValue { key: &'static str },

    #[error("'{key}' must be exactly one of ',', ';', '|' or ' ', got '{value}'")]
    InvalidDelimiter { key: &'static str, value: String },

    #[error("'{key}' contains an invalid locale tag '{value}'")]
    InvalidLocale { key: &'static str, value: String },

    #[error("default language '{language}' is not listed in supportedLanguages ({supported})")]
    UnsupportedDefaultLanguage { language: String, supported: String },

    #[error("alias keys '{key}' and '{alias}' disagree: '{value}' vs '{alias_value}'")]
    AliasMismatch {
        key: &'static str,
        alias: &'static str,
        value: String,
        alias_value: String,
    },

    #[error("malformed env.js assignment on line {line}: {content}")]
    MalformedEnvJs { line: usize, content: String },

    #[error("unknown setting key '{0}'")]
    UnknownKey(String),
}

impl SettingsError {
    /// The setting key the error refers to, when there is one.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::InvalidBoolean { key, .. }
            | Self::InvalidInteger { key, .. }
            | Self::InvalidUrl { key, .. }
            | Self::MissingValue { key }
            | Self::InvalidDelimiter { key, .. }
            | Self::InvalidLocale { key, .. }
            | Self::AliasMismatch { key, .. } => Some(key),
            Self::UnsupportedDefaultLanguage { .. } => Some("defaultLanguage"),
            Self::UnknownKey(key) => Some(key.as_str()),
            Self::MalformedEnvJs { .. } => None,
        }
    }
}
