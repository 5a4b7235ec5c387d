//! 统一错误处理
//!
//! 错误类型定义在 `shared::error`，这里做 re-export 并提供
//! 响应包装辅助函数。
//!
//! # 使用示例
//!
//! ```ignore
//! // 返回错误
//! Err(AppError::not_found("Booking 25-0001"))
//!
//! // 返回成功响应
//! Ok(ok(data))
//! ```

use axum::Json;
use serde::Serialize;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

/// Create a successful `{success: true, data}` response
pub fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse::success(data))
}

/// Create a successful response with a custom message
pub fn ok_with_message<T: Serialize>(
    data: T,
    message: impl Into<String>,
) -> Json<ApiResponse<T>> {
    Json(ApiResponse::success_with_message(message, data))
}

/// Map a repository/driver error to a database [`AppError`]
///
/// `context` 作为响应的 message，原始错误进入 error 字段。
pub fn db_error<E: std::fmt::Display>(context: &'static str) -> impl FnOnce(E) -> AppError {
    move |e| AppError::with_message(ErrorCode::DatabaseError, context).with_detail(e.to_string())
}
