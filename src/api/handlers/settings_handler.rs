use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::debug;

use crate::{
    api::{app_state::AppState, dto::settings_dto::*},
    error::AppError,
    settings::SettingKey,
};

pub async fn list_settings(State(state): State<AppState>) -> impl IntoResponse {
    let settings: Vec<SettingResponse> = SettingKey::ALL
        .iter()
        .map(|&key| SettingResponse::from_settings(&state.settings, key))
        .collect();

    Json(SettingsListResponse {
        total: settings.len(),
        settings,
    })
}

pub async fn get_setting(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Looking up setting: {}", name);
    state.metrics.record_setting_lookup();

    let key: SettingKey = name
        .parse()
        .map_err(|_| AppError::NotFound(format!("setting '{name}'")))?;

    Ok(Json(SettingResponse::from_settings(&state.settings, key)))
}

/// 返回类型化配置
pub async fn get_config(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.config.as_ref().clone())
}
