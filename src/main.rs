use mifos_env::api::{self, app_state::AppState};
use mifos_env::config::loader::{ConfigLoader, config_exists, default_config_path};
use mifos_env::observability::{
    HealthCheckResult, ObservabilityState, create_observability_router, init_tracing,
    metrics_middleware,
};
use mifos_env::settings::SettingKey;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ConfigLoader::load()?;
    ConfigLoader::validate(&config)?;
    let _log_guard = init_tracing(&config.logging, &config.app_name)?;

    info!(
        "Starting {} ({} environment)...",
        config.app_name, config.environment
    );
    if config_exists() {
        info!("Service config loaded from {}", default_config_path().display());
    } else {
        info!("No {} found, using defaults and environment", default_config_path().display());
    }

    let (settings, web_app) = ConfigLoader::load_web_app(&config.sources)?;
    info!(
        "Settings validated: {} tenant(s), {} language(s), oauth={}",
        web_app.tenant_ids.len(),
        web_app.supported_languages.len(),
        web_app.oauth_enabled()
    );

    // Render-only mode for static deployments
    if ConfigLoader::render_if_requested(&config, &settings)? {
        return Ok(());
    }

    let observability_state = Arc::new(ObservabilityState::new(
        env!("CARGO_PKG_VERSION").to_string(),
    ));
    observability_state
        .add_health_check(HealthCheckResult {
            name: "settings".to_string(),
            healthy: true,
            message: format!("{} keys loaded", SettingKey::ALL.len()),
        })
        .await;

    let app_state = AppState::new(settings, web_app, observability_state.metrics.clone());
    info!("Application state created");

    let mut router = create_observability_router(observability_state.clone())
        .merge(api::create_router(app_state))
        .layer(axum::middleware::from_fn_with_state(
            observability_state,
            metrics_middleware,
        ));
    if let Some(cors) = api::cors_layer(&config.server.cors_origins) {
        router = router.layer(cors);
    }
    info!("API router created with observability endpoints");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        // without a signal handler the server runs until killed
        Err(_) => std::future::pending::<()>().await,
    }
}
