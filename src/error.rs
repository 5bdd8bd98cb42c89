//! 错误处理模块
//!
//! 定义应用程序的错误类型和错误处理逻辑。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::settings::SettingsError;

/// 应用程序错误类型
#[derive(Error, Debug)]
pub enum AppError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),

    /// 设置校验错误
    #[error("设置错误: {0}")]
    Settings(#[from] SettingsError),

    /// 资源不存在
    #[error("资源不存在: {0}")]
    NotFound(String),

    /// 序列化错误
    #[error("序列化错误: {0}")]
    Serialization(String),

    /// 内部错误
    #[error("内部错误: {0}")]
    Internal(String),

    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(String),
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Serialization(e.to_string())
    }
}

impl From<figment::Error> for AppError {
    fn from(e: figment::Error) -> Self {
        AppError::Config(e.to_string())
    }
}

/// Axum response implementation for AppError
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = (&self).into();
        let mut body = ErrorResponse::new(&code, &self.to_string());
        if let AppError::Settings(e) = &self {
            if let Some(key) = e.key() {
                body = body.with_details(key);
            }
        }
        (
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Json(body),
        )
            .into_response()
    }
}

/// 错误响应
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// 错误代码
    pub code: String,
    /// 错误消息
    pub message: String,
    /// 详细信息
    pub details: Option<String>,
}

impl ErrorResponse {
    /// 创建新错误响应
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            details: None,
        }
    }

    /// 添加详细信息
    pub fn with_details(mut self, details: &str) -> Self {
        self.details = Some(details.to_string());
        self
    }
}

/// HTTP 状态码映射
impl From<&AppError> for (u16, String) {
    fn from(err: &AppError) -> (u16, String) {
        match err {
            AppError::NotFound(_) => (404, "NOT_FOUND".to_string()),
            AppError::Settings(_) => (422, "INVALID_SETTING".to_string()),
            AppError::Config(_) => (500, "CONFIG_ERROR".to_string()),
            _ => (500, "INTERNAL_ERROR".to_string()),
        }
    }
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let (status, code) = (&AppError::NotFound("setting 'x'".into())).into();
        assert_eq!((status, code.as_str()), (404, "NOT_FOUND"));

        let err = AppError::from(SettingsError::UnknownKey("x".into()));
        let (status, code) = (&err).into();
        assert_eq!((status, code.as_str()), (422, "INVALID_SETTING"));
    }

    #[test]
    fn test_into_response_uses_mapped_status() {
        let response = AppError::NotFound("setting 'tenant'".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
