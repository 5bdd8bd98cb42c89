//! env.js 编解码
//!
//! 渲染 web 应用在启动时加载的 `window["env"]` 脚本，并支持把已有的 env.js
//! 导入为 figment 配置源。

use figment::{
    Figment, Metadata, Profile, Provider,
    providers::Serialized,
    value::{Dict, Map},
};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::settings::error::SettingsError;
use crate::settings::keys::SettingKey;
use crate::settings::store::EnvSettings;

// `window["env"]`, `window['env']` or `window.env`
const ENV_OBJECT: &str = r#"window(?:\.env|\[\s*["']env["']\s*\])"#;

static INIT_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^{ENV_OBJECT}\s*=\s*{ENV_OBJECT}\s*\|\|\s*\{{\s*\}}\s*;?$"))
        .expect("valid init regex")
});

static ASSIGNMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r#"^{ENV_OBJECT}(?:\.([A-Za-z]+)|\[\s*["']([A-Za-z]+)["']\s*\])\s*=\s*(?:'((?:[^'\\]|\\.)*)'|"((?:[^"\\]|\\.)*)")\s*;?$"#
    ))
    .expect("valid assignment regex")
});

static WRAPPER_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\(\s*function\s*\(\s*window\s*\)\s*\{|\}\s*\)\s*\(\s*this\s*\)\s*;?)$")
        .expect("valid wrapper regex")
});

fn is_comment(line: &str) -> bool {
    line.starts_with("//") || line.starts_with("/*") || line.starts_with('*')
}

/// 渲染 env.js 脚本
///
/// One assignment per key, in declaration order.
pub fn render(settings: &EnvSettings) -> String {
    let mut out = String::from("(function(window) {\n  window[\"env\"] = window[\"env\"] || {};\n\n");
    for (key, value) in settings.iter() {
        out.push_str(&format!(
            "  window[\"env\"][\"{}\"] = '{}';\n",
            key,
            escape(value)
        ));
    }
    out.push_str("})(this);\n");
    out
}

/// 把渲染结果写入文件，必要时创建父目录
pub fn write_to(settings: &EnvSettings, path: impl AsRef<Path>) -> std::io::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, render(settings))
}

/// 解析 env.js 脚本中的赋值语句
///
/// Comments, blank lines and the IIFE wrapper are skipped; any other
/// statement must be a string assignment to `window.env`. Later assignments
/// to the same key win, matching what the browser would do.
pub fn parse(source: &str) -> Result<BTreeMap<SettingKey, String>, SettingsError> {
    let mut values = BTreeMap::new();

    for (index, raw_line) in source.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty()
            || is_comment(line)
            || WRAPPER_LINE.is_match(line)
            || INIT_LINE.is_match(line)
        {
            continue;
        }

        let captures = ASSIGNMENT
            .captures(line)
            .ok_or_else(|| SettingsError::MalformedEnvJs {
                line: index + 1,
                content: line.to_string(),
            })?;

        let name = captures
            .get(1)
            .or_else(|| captures.get(2))
            .map_or("", |m| m.as_str());
        let key: SettingKey = name.parse()?;
        let value = captures
            .get(3)
            .or_else(|| captures.get(4))
            .map(|m| unescape(m.as_str()))
            .unwrap_or_default();
        values.insert(key, value);
    }

    Ok(values)
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            // keeps "</script>" from closing an inline script tag
            '<' => out.push_str("\\x3C"),
            c => out.push(c),
        }
    }
    out
}

fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('x') => push_hex(&mut out, &mut chars, 2),
            Some('u') => push_hex(&mut out, &mut chars, 4),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

fn push_hex(out: &mut String, chars: &mut std::str::Chars<'_>, width: usize) {
    let digits: String = chars.by_ref().take(width).collect();
    match u32::from_str_radix(&digits, 16).ok().and_then(char::from_u32) {
        Some(c) if digits.len() == width => out.push(c),
        _ => out.push_str(&digits),
    }
}

enum Source {
    File(PathBuf),
    Inline(String),
}

/// figment 配置源：从 env.js 读取设置
///
/// A missing file yields no values, like figment's own file providers.
pub struct EnvJs {
    source: Source,
}

impl EnvJs {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            source: Source::File(path.into()),
        }
    }

    pub fn string(source: impl Into<String>) -> Self {
        Self {
            source: Source::Inline(source.into()),
        }
    }

    fn read(&self) -> Result<Option<String>, figment::Error> {
        match &self.source {
            Source::Inline(text) => Ok(Some(text.clone())),
            Source::File(path) => match std::fs::read_to_string(path) {
                Ok(text) => Ok(Some(text)),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
                Err(e) => Err(figment::Error::from(format!(
                    "failed to read {}: {e}",
                    path.display()
                ))),
            },
        }
    }
}

impl Provider for EnvJs {
    fn metadata(&self) -> Metadata {
        match &self.source {
            Source::File(path) => Metadata::named(format!("env.js file `{}`", path.display())),
            Source::Inline(_) => Metadata::named("env.js source"),
        }
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        let Some(text) = self.read()? else {
            return Ok(Map::new());
        };
        let values: BTreeMap<String, String> = parse(&text)
            .map_err(|e| figment::Error::from(e.to_string()))?
            .into_iter()
            .map(|(key, value)| (key.as_str().to_string(), value))
            .collect();
        Serialized::defaults(values).data()
    }
}

/// 从 env.js 文本直接还原完整设置
///
/// Keys the script omits keep their bundled values.
pub fn load_str(source: &str) -> Result<EnvSettings, figment::Error> {
    Figment::from(Serialized::defaults(EnvSettings::bundled()))
        .merge(EnvJs::string(source))
        .extract()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGINAL: &str = r#"(function(window) {
  window["env"] = window["env"] || {};

  // BackEnd Environment variables
  window["env"]["fineractApiUrls"] = 'https://fineract.example.org';
  window["env"]["fineractApiUrl"]  = 'https://fineract.example.org';

  window['env']['preloadClients'] = 'false';

  // Char delimiter to Export CSV options: ',' ';' '|' ' '
  window['env']['defaultCharDelimiter'] = ';';

  window['env']['waitTimeForNotifications'] = '';
})(this);
"#;

    #[test]
    fn test_parse_accepts_both_quote_styles() {
        let values = parse(ORIGINAL).unwrap();
        assert_eq!(values.len(), 5);
        assert_eq!(values[&SettingKey::PreloadClients], "false");
        assert_eq!(values[&SettingKey::DefaultCharDelimiter], ";");
        assert_eq!(values[&SettingKey::WaitTimeForNotifications], "");
    }

    #[test]
    fn test_render_then_parse_reproduces_every_pair() {
        let settings = EnvSettings::bundled()
            .with_value(SettingKey::OauthAppId, "it's \\ tricky\n</script>");
        let script = render(&settings);
        let values = parse(&script).unwrap();
        assert_eq!(values.len(), SettingKey::ALL.len());
        for (key, value) in settings.iter() {
            assert_eq!(values[&key], value, "mismatch for {key}");
        }
        assert!(!script.contains("</script>"));
    }

    #[test]
    fn test_render_keeps_declaration_order() {
        let script = render(&EnvSettings::bundled());
        let first = script.find("fineractApiUrls").unwrap();
        let last = script.find("oauthAppId").unwrap();
        assert!(first < last);
        assert!(script.starts_with("(function(window) {"));
        assert!(script.trim_end().ends_with("})(this);"));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = parse("window['env']['tenantIdentifier'] = 'x';").unwrap_err();
        assert_eq!(err, SettingsError::UnknownKey("tenantIdentifier".into()));
    }

    #[test]
    fn test_non_string_assignment_is_malformed() {
        let err = parse("\n  window['env']['preloadClients'] = true;").unwrap_err();
        assert!(matches!(err, SettingsError::MalformedEnvJs { line: 2, .. }));
    }

    #[test]
    fn test_parse_accepts_dot_notation() {
        let values = parse(
            "window.env = window.env || {};\n\
             window.env.defaultLanguage = 'de-DE';\n\
             window.env['apiVersion'] = \"/v2\";",
        )
        .unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(values[&SettingKey::DefaultLanguage], "de-DE");
        assert_eq!(values[&SettingKey::ApiVersion], "/v2");
    }

    #[test]
    fn test_stray_statement_is_malformed() {
        let err = parse("(function(window) {\n  env.apiVersion = '/v2';\n})(this);").unwrap_err();
        assert!(matches!(err, SettingsError::MalformedEnvJs { line: 2, .. }));
    }

    #[test]
    fn test_shipped_script_imports_as_bundled() {
        let shipped = render(&EnvSettings::bundled());
        assert_eq!(load_str(&shipped).unwrap(), EnvSettings::bundled());
    }

    #[test]
    fn test_later_assignment_wins() {
        let values = parse(
            "window['env']['apiVersion'] = '/v1';\nwindow['env']['apiVersion'] = '/v2';",
        )
        .unwrap();
        assert_eq!(values[&SettingKey::ApiVersion], "/v2");
    }

    #[test]
    fn test_load_str_merges_over_bundled() {
        let settings = load_str(ORIGINAL).unwrap();
        assert_eq!(settings.fineract_api_url, "https://fineract.example.org");
        assert_eq!(settings.preload_clients, "false");
        assert_eq!(settings.api_version, "/v1");
    }

    #[test]
    fn test_written_file_imports_back() {
        figment::Jail::expect_with(|jail| {
            let settings = EnvSettings::bundled().with_value(SettingKey::DisplayTenantSelector, "true");
            let path = jail.directory().join("dist/assets/env.js");
            write_to(&settings, &path).map_err(|e| e.to_string())?;

            let reloaded: EnvSettings = Figment::from(Serialized::defaults(EnvSettings::bundled()))
                .merge(EnvJs::file(&path))
                .extract()?;
            assert_eq!(reloaded, settings);
            Ok(())
        });
    }

    #[test]
    fn test_missing_file_provides_nothing() {
        let data = EnvJs::file("/nonexistent/assets/env.js").data().unwrap();
        assert!(data.is_empty());
    }
}
