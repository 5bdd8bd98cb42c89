//! 可观测性模块
//!
//! 提供 Prometheus 格式指标、结构化日志和健康检查。

use axum::{
    Json, Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    routing::get,
};

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use tokio::sync::Mutex;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt::writer::BoxMakeWriter};

use crate::config::config::LoggingConfig;
use crate::error::{AppError, Result};

// ===== Simple Metrics =====

/// 简单应用指标
#[derive(Debug, Default)]
pub struct AppMetrics {
    pub http_requests_total: AtomicU64,
    pub http_request_duration_sum: AtomicU64,
    pub active_connections: AtomicUsize,
    pub env_js_served_total: AtomicU64,
    pub setting_lookups_total: AtomicU64,
    pub errors_total: AtomicU64,
}

impl AppMetrics {
    /// 记录 HTTP 请求
    pub fn record_http_request(&self, duration_ms: u64) {
        self.http_requests_total.fetch_add(1, Ordering::SeqCst);
        self.http_request_duration_sum
            .fetch_add(duration_ms, Ordering::SeqCst);
    }

    pub fn connection_opened(&self) {
        self.active_connections.fetch_add(1, Ordering::SeqCst);
    }

    pub fn connection_closed(&self) {
        self.active_connections.fetch_sub(1, Ordering::SeqCst);
    }

    /// 记录 env.js 下发
    pub fn record_env_js_served(&self) {
        self.env_js_served_total.fetch_add(1, Ordering::SeqCst);
    }

    /// 记录单项设置查询
    pub fn record_setting_lookup(&self) {
        self.setting_lookups_total.fetch_add(1, Ordering::SeqCst);
    }

    /// 记录错误
    pub fn record_error(&self) {
        self.errors_total.fetch_add(1, Ordering::SeqCst);
    }

    /// 生成 Prometheus 格式指标
    pub fn gather(&self) -> String {
        format!(
            r#"# HELP http_requests_total Total HTTP requests
# TYPE http_requests_total counter
http_requests_total {}
# HELP http_request_duration_seconds HTTP request duration in seconds
# TYPE http_request_duration_seconds histogram
http_request_duration_seconds_sum {}
http_request_duration_seconds_count {}
# HELP active_connections Active HTTP connections
# TYPE active_connections gauge
active_connections {}
# HELP env_js_served_total env.js responses served
# TYPE env_js_served_total counter
env_js_served_total {}
# HELP setting_lookups_total Single setting lookups
# TYPE setting_lookups_total counter
setting_lookups_total {}
# HELP errors_total Total error responses
# TYPE errors_total counter
errors_total {}
"#,
            self.http_requests_total.load(Ordering::SeqCst),
            self.http_request_duration_sum.load(Ordering::SeqCst) as f64 / 1000.0,
            self.http_requests_total.load(Ordering::SeqCst),
            self.active_connections.load(Ordering::SeqCst),
            self.env_js_served_total.load(Ordering::SeqCst),
            self.setting_lookups_total.load(Ordering::SeqCst),
            self.errors_total.load(Ordering::SeqCst),
        )
    }
}

// ===== Health Check =====

/// 健康检查状态
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
    pub version: String,
    pub uptime_seconds: f64,
    pub checks: Vec<HealthCheck>,
}

/// 单个健康检查项
#[derive(Debug, Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: String,
    pub message: Option<String>,
}

/// 健康检查结果
#[derive(Debug, Clone)]
pub struct HealthCheckResult {
    pub name: String,
    pub healthy: bool,
    pub message: String,
}

/// 可观测性状态
#[derive(Debug, Clone)]
pub struct ObservabilityState {
    pub metrics: Arc<AppMetrics>,
    pub health_checks: Arc<Mutex<Vec<HealthCheckResult>>>,
    pub start_time: DateTime<Utc>,
    pub version: String,
}

impl ObservabilityState {
    pub fn new(version: String) -> Self {
        Self {
            metrics: Arc::new(AppMetrics::default()),
            health_checks: Arc::new(Mutex::new(Vec::new())),
            start_time: Utc::now(),
            version,
        }
    }

    /// 添加健康检查结果
    pub async fn add_health_check(&self, result: HealthCheckResult) {
        let mut checks = self.health_checks.lock().await;
        checks.retain(|c| c.name != result.name);
        checks.push(result);
        if checks.len() > 10 {
            checks.remove(0);
        }
    }

    /// 获取应用正常运行时间
    pub fn uptime_seconds(&self) -> f64 {
        (Utc::now() - self.start_time).num_seconds() as f64
    }
}

fn status_label(healthy: bool) -> String {
    let label = if healthy { "healthy" } else { "unhealthy" };
    label.to_string()
}

// ===== Health Check Handlers =====

/// 获取完整健康状态
pub async fn health_check(State(state): State<Arc<ObservabilityState>>) -> impl IntoResponse {
    let checks = state.health_checks.lock().await;
    let all_healthy = checks.iter().all(|c| c.healthy);

    let health_status = HealthStatus {
        status: status_label(all_healthy),
        timestamp: Utc::now().to_rfc3339(),
        version: state.version.clone(),
        uptime_seconds: state.uptime_seconds(),
        checks: checks
            .iter()
            .map(|c| HealthCheck {
                name: c.name.clone(),
                status: status_label(c.healthy),
                message: Some(c.message.clone()),
            })
            .collect(),
    };

    let status_code = if all_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(health_status))
}

/// 简单存活检查
pub async fn liveness() -> impl IntoResponse {
    "OK"
}

/// 就绪检查
///
/// Not ready until at least one check has been registered and all pass.
pub async fn readiness(State(state): State<Arc<ObservabilityState>>) -> impl IntoResponse {
    let checks = state.health_checks.lock().await;
    let ready = !checks.is_empty() && checks.iter().all(|c| c.healthy);

    if ready {
        (StatusCode::OK, "Ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "Not Ready")
    }
}

/// Prometheus 指标端点
pub async fn metrics(State(state): State<Arc<ObservabilityState>>) -> impl IntoResponse {
    (StatusCode::OK, state.metrics.gather())
}

/// 版本信息端点
pub async fn version(State(state): State<Arc<ObservabilityState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "version": state.version,
        "uptime_seconds": state.uptime_seconds(),
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// 创建可观测性路由
pub fn create_observability_router(state: Arc<ObservabilityState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/live", get(liveness))
        .route("/health/ready", get(readiness))
        .route("/metrics", get(metrics))
        .route("/version", get(version))
        .with_state(state)
}

// ===== Structured Logging =====

/// 初始化结构化日志
///
/// `RUST_LOG` takes precedence over the configured level. When a log
/// directory is configured, output goes to a daily rolling file and the
/// returned guard must be kept alive to flush it.
pub fn init_tracing(config: &LoggingConfig, service_name: &str) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| AppError::Config(format!("invalid log level '{}': {e}", config.level)))?;

    let (writer, guard) = match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, format!("{service_name}.log"));
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(non_blocking), Some(guard))
        }
        None => (BoxMakeWriter::new(std::io::stdout), None),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_line_number(true)
        .with_writer(writer);

    let installed = if config.structured {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| AppError::Internal(format!("failed to install tracing subscriber: {e}")))?;

    Ok(guard)
}

// ===== Request Metrics Middleware =====

/// 记录请求指标的中间件
pub async fn metrics_middleware(
    State(state): State<Arc<ObservabilityState>>,
    req: Request,
    next: Next,
) -> Response {
    let start = std::time::Instant::now();

    state.metrics.connection_opened();

    let response = next.run(req).await;

    let duration_ms = start.elapsed().as_millis() as u64;
    state.metrics.record_http_request(duration_ms);
    state.metrics.connection_closed();
    if response.status().is_client_error() || response.status().is_server_error() {
        state.metrics.record_error();
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use tower::ServiceExt;

    #[test]
    fn test_metrics_gather() {
        let metrics = AppMetrics::default();
        metrics.record_http_request(100);
        metrics.connection_opened();
        metrics.record_env_js_served();
        metrics.record_setting_lookup();
        metrics.record_error();

        let output = metrics.gather();
        assert!(output.contains("http_requests_total 1"));
        assert!(output.contains("active_connections 1"));
        assert!(output.contains("env_js_served_total 1"));
        assert!(output.contains("setting_lookups_total 1"));
        assert!(output.contains("errors_total 1"));
    }

    #[tokio::test]
    async fn test_readiness_requires_registered_checks() {
        let state = Arc::new(ObservabilityState::new("0.1.0".to_string()));
        let app = create_observability_router(state.clone());

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/health/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        state
            .add_health_check(HealthCheckResult {
                name: "settings".to_string(),
                healthy: true,
                message: "18 keys loaded".to_string(),
            })
            .await;

        let response = app
            .oneshot(Request::builder().uri("/health/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_check_replaces_same_name() {
        let state = ObservabilityState::new("0.1.0".to_string());
        for healthy in [false, true] {
            state
                .add_health_check(HealthCheckResult {
                    name: "settings".to_string(),
                    healthy,
                    message: String::new(),
                })
                .await;
        }
        let checks = state.health_checks.lock().await;
        assert_eq!(checks.len(), 1);
        assert!(checks[0].healthy);
    }
}
