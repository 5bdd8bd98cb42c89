#[cfg(test)]
mod settings_api_tests {
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::api::{app_state::AppState, create_router, cors_layer};
    use crate::settings::{EnvSettings, SettingKey, envjs};

    fn app() -> axum::Router {
        create_router(AppState::bundled().unwrap())
    }

    async fn get(app: axum::Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, body.to_vec())
    }

    #[tokio::test]
    async fn test_env_js_is_served_as_uncached_script() {
        let (status, headers, body) = get(app(), "/assets/env.js").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            headers[header::CONTENT_TYPE],
            "application/javascript; charset=utf-8"
        );
        assert_eq!(headers[header::CACHE_CONTROL], "no-store");

        let script = String::from_utf8(body).unwrap();
        let values = envjs::parse(&script).unwrap();
        assert_eq!(values.len(), SettingKey::ALL.len());
        assert_eq!(values[&SettingKey::ApiProvider], "/fineract-provider/api");
    }

    #[tokio::test]
    async fn test_env_json_reloads_to_same_settings() {
        let (status, _, body) = get(app(), "/env.json").await;

        assert_eq!(status, StatusCode::OK);
        let reloaded: EnvSettings = serde_json::from_slice(&body).unwrap();
        assert_eq!(reloaded, EnvSettings::bundled());
    }

    #[tokio::test]
    async fn test_get_setting_reports_effective_value() {
        let (status, _, body) = get(app(), "/api/v1/settings/waitTimeForCOBCatchUp").await;

        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["value"], "");
        assert_eq!(json["effective"], "30");
        assert_eq!(json["kind"], "seconds");
        assert_eq!(json["env_var"], "MIFOS_WAIT_TIME_FOR_COB_CATCH_UP");
    }

    #[tokio::test]
    async fn test_get_setting_reports_alias() {
        let (_, _, body) = get(app(), "/api/v1/settings/fineractPlatformTenantId").await;

        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["alias"], "fineractPlatformTenantIds");
        assert_eq!(json["value"], "default");
    }

    #[tokio::test]
    async fn test_unknown_setting_returns_404() {
        let (status, _, body) = get(app(), "/api/v1/settings/tenantIdentifier").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_list_settings_in_declaration_order() {
        let (status, _, body) = get(app(), "/api/v1/settings").await;

        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["total"], 18);
        assert_eq!(json["settings"][0]["key"], "fineractApiUrls");
        assert_eq!(json["settings"][17]["key"], "oauthAppId");
    }

    #[tokio::test]
    async fn test_typed_config_endpoint() {
        let (status, _, body) = get(app(), "/api/v1/config").await;

        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            json["api"]["endpoints"][0],
            "http://localhost:8080/fineract-provider/api/v1"
        );
        assert_eq!(json["csv_delimiter"], ",");
        assert!(json["oauth"].is_null());
    }

    #[tokio::test]
    async fn test_security_headers_present() {
        let (_, headers, _) = get(app(), "/api/v1/settings").await;
        assert_eq!(headers[header::X_FRAME_OPTIONS], "DENY");
    }

    #[tokio::test]
    async fn test_env_js_requests_are_counted() {
        let state = AppState::bundled().unwrap();
        let metrics = state.metrics.clone();
        let app = create_router(state);

        get(app.clone(), "/assets/env.js").await;
        get(app, "/assets/env.js").await;

        assert_eq!(
            metrics
                .env_js_served_total
                .load(std::sync::atomic::Ordering::SeqCst),
            2
        );
    }

    #[test]
    fn test_cors_layer_skips_when_no_origins() {
        assert!(cors_layer(&[]).is_none());
        assert!(cors_layer(&["http://localhost:4200".to_string()]).is_some());
    }
}
