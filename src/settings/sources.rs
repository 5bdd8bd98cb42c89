//! 设置配置源
//!
//! 环境变量覆盖层，以及让别名键在同一层内保持一致的包装器。

use figment::{
    Metadata, Profile, Provider,
    providers::Serialized,
    value::{Dict, Map},
};
use std::collections::BTreeMap;

use crate::settings::keys::SettingKey;

/// 读取 `MIFOS_*` 环境变量覆盖设置
///
/// Only variables that are present are emitted, so unset variables never
/// clobber values from earlier layers. An empty variable is a real value.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvOverrides;

impl EnvOverrides {
    /// Present overrides keyed by wire name.
    pub fn collect() -> BTreeMap<String, String> {
        SettingKey::ALL
            .iter()
            .filter_map(|key| {
                std::env::var(key.env_var())
                    .ok()
                    .map(|value| (key.as_str().to_string(), value))
            })
            .collect()
    }
}

impl Provider for EnvOverrides {
    fn metadata(&self) -> Metadata {
        Metadata::named("MIFOS_* environment variable(s)")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        Serialized::defaults(Self::collect()).data()
    }
}

/// 别名镜像
///
/// Wraps a provider so that a layer setting only one half of an alias pair
/// sets both. A layer that sets both halves is left untouched; disagreement
/// is reported later by validation.
pub struct AliasMirror<P>(pub P);

impl<P: Provider> Provider for AliasMirror<P> {
    fn metadata(&self) -> Metadata {
        self.0.metadata()
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        let mut data = self.0.data()?;
        for dict in data.values_mut() {
            mirror_aliases(dict);
        }
        Ok(data)
    }

    fn profile(&self) -> Option<Profile> {
        self.0.profile()
    }
}

fn mirror_aliases(dict: &mut Dict) {
    for (key, alias) in SettingKey::ALIAS_PAIRS {
        let (key, alias) = (key.as_str(), alias.as_str());
        match (dict.get(key).cloned(), dict.get(alias).cloned()) {
            (Some(value), None) => {
                dict.insert(alias.to_string(), value);
            }
            (None, Some(value)) => {
                dict.insert(key.to_string(), value);
            }
            _ => {}
        }
    }
}
