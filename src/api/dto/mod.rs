//! DTO 模块
//!
//! 定义 API 请求和响应的数据传输对象。

pub mod settings_dto;
