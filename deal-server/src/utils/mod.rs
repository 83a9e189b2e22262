//! 工具模块
//!
//! - [`AppError`] / [`ApiResponse`] - 统一错误与响应 (from shared::error)
//! - [`logger`] - 日志初始化

pub mod logger;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

/// 包装成功响应
pub fn ok<T: serde::Serialize>(data: T) -> AppResult<axum::Json<ApiResponse<T>>> {
    Ok(axum::Json(ApiResponse::success(data)))
}
