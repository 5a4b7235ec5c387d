//! Shared types for the booking backend
//!
//! 统一错误体系，服务器和管理端共用：
//!
//! - [`error::ErrorCode`] - 标准化错误码
//! - [`error::ErrorCategory`] - 错误分类
//! - [`error::AppError`] - 应用错误类型
//! - [`error::ApiResponse`] - API 响应结构

pub mod error;

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
