//! Payment API Handlers
//!
//! 支付记录按预订号定位，每个预订取最新一行。
//! 更新为部分更新：未提交的字段保留已存储的值，余额始终重算。

use axum::{
    Json,
    extract::{Path, State},
};
use rust_decimal::Decimal;

use crate::api::{AppResult, db_error, ok, ok_with_message};
use crate::core::ServerState;
use crate::db::models::{Payment, PaymentUpdate};
use crate::db::repository::{
    booking as booking_repo, payment as payment_repo,
};
use crate::utils::validation::{MAX_SHORT_TEXT_LEN, validate_optional_text};
use crate::utils::{ApiResponse, AppError, ErrorCode};

/// GET /api/payments - 每个预订的最新支付记录
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<Vec<Payment>>>> {
    let payments = payment_repo::list_latest(&state.db)
        .await
        .map_err(db_error("Failed to fetch payments"))?;
    Ok(ok(payments))
}

/// GET /api/payments/:booking_id - 预订的最新支付记录
pub async fn get_by_booking(
    State(state): State<ServerState>,
    Path(booking_id): Path<String>,
) -> AppResult<Json<ApiResponse<Payment>>> {
    let booking_id = booking_id.trim().to_string();
    let payment = payment_repo::latest_for_booking(&state.db, &booking_id)
        .await
        .map_err(db_error("Failed to fetch payment"))?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::PaymentNotFound,
                format!("No payment recorded for booking {booking_id}"),
            )
        })?;
    Ok(ok(payment))
}

/// PUT /api/payments/:booking_id - 更新支付记录
///
/// 预订必须存在；没有支付记录时按提交的值新建一条。
pub async fn update(
    State(state): State<ServerState>,
    Path(booking_id): Path<String>,
    Json(payload): Json<PaymentUpdate>,
) -> AppResult<Json<ApiResponse<Payment>>> {
    let booking_id = booking_id.trim().to_string();

    validate_optional_text(&payload.payment_method, "payment_method", MAX_SHORT_TEXT_LEN)?;
    for amount in [payload.total_amount, payload.amount_paid]
        .into_iter()
        .flatten()
    {
        if amount < Decimal::ZERO {
            return Err(AppError::with_message(
                ErrorCode::InvalidPaymentAmount,
                "amounts must not be negative",
            ));
        }
    }

    booking_repo::find_by_id(&state.db, &booking_id)
        .await
        .map_err(db_error("Failed to fetch booking"))?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::BookingNotFound,
                format!("Booking {booking_id} not found"),
            )
        })?;

    // Merge with the stored record so a partial update keeps the other fields
    let existing = payment_repo::latest_for_booking(&state.db, &booking_id)
        .await
        .map_err(db_error("Failed to fetch payment"))?;

    let total = payload
        .total_amount
        .or(existing.as_ref().map(|p| p.total_amount))
        .unwrap_or(Decimal::ZERO);
    let paid = payload
        .amount_paid
        .or(existing.as_ref().map(|p| p.amount_paid))
        .unwrap_or(Decimal::ZERO);
    let method = payload
        .payment_method
        .or(existing.as_ref().and_then(|p| p.payment_method.clone()));
    let date = payload
        .payment_date
        .or(existing.as_ref().and_then(|p| p.payment_date));

    let payment = payment_repo::upsert(&state.db, &booking_id, total, paid, method.as_deref(), date)
        .await
        .map_err(db_error("Failed to save payment"))?;

    Ok(ok_with_message(payment, "Payment updated successfully"))
}

/// DELETE /api/payments/:booking_id - 删除预订的支付记录
pub async fn delete(
    State(state): State<ServerState>,
    Path(booking_id): Path<String>,
) -> AppResult<Json<ApiResponse<bool>>> {
    let booking_id = booking_id.trim().to_string();
    let deleted = payment_repo::delete_for_booking(&state.db, &booking_id)
        .await
        .map_err(db_error("Failed to delete payment"))?;

    if !deleted {
        return Err(AppError::with_message(
            ErrorCode::PaymentNotFound,
            format!("No payment recorded for booking {booking_id}"),
        ));
    }
    Ok(ok_with_message(true, "Payment deleted"))
}
