use crate::observability::AppMetrics;
use crate::settings::{EnvSettings, WebAppConfig, envjs};
use std::sync::Arc;

/// Application state shared by every handler.
///
/// Built once at startup; handlers only ever read it.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Raw string settings, exactly as the web app sees them
    pub settings: Arc<EnvSettings>,
    /// Typed view validated at load time
    pub config: Arc<WebAppConfig>,
    /// Pre-rendered env.js script
    pub env_js: Arc<str>,
    /// Request counters shared with the observability router
    pub metrics: Arc<AppMetrics>,
}

impl AppState {
    /// Create new application state
    pub fn new(settings: EnvSettings, config: WebAppConfig, metrics: Arc<AppMetrics>) -> Self {
        let env_js: Arc<str> = envjs::render(&settings).into();
        Self {
            settings: Arc::new(settings),
            config: Arc::new(config),
            env_js,
            metrics,
        }
    }

    /// State built from the bundled settings.
    pub fn bundled() -> crate::error::Result<Self> {
        let settings = EnvSettings::bundled();
        let config = WebAppConfig::from_settings(&settings)?;
        Ok(Self::new(settings, config, Arc::new(AppMetrics::default())))
    }
}
