//! Unified error system for the booking backend
//!
//! This module provides a comprehensive error handling system with:
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and driver detail
//! - [`ApiResponse`]: Unified API response format (`{success, message, data, error}`)
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Booking errors
//! - 2xxx: Payment errors
//! - 3xxx: Catalog errors
//! - 4xxx: Email errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ApiResponse};
//!
//! // Create a simple error
//! let err = AppError::new(ErrorCode::BookingNotFound);
//!
//! // Create an error with custom message
//! let err = AppError::with_message(ErrorCode::ValidationFailed, "check_in date is required");
//!
//! // Attach the underlying driver error for the response `error` field
//! let err = AppError::database("insert failed").with_detail("connection refused");
//!
//! // Convert to API response
//! let response = ApiResponse::<()>::error(&err);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
