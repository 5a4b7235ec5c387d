//! Booking API Handlers
//!
//! 预订读取走聚合组装：主行 + 酒店 + 车辆/面包车/潜水子记录 + 最新支付，
//! 列表通过 `ANY` 批量取子记录再按预订号分组。
//! 写入按约定顺序执行：父行 → 子集合整体替换 → 派生总额 → 支付记录。

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::api::{AppResult, db_error, ok, ok_with_message};
use crate::core::ServerState;
use crate::db::models::{
    Booking, BookingDetails, BookingStatus, BookingWrite, Hotel, Payment, fallback_total,
};
use crate::db::repository::{
    booking as booking_repo, hotel as hotel_repo, payment as payment_repo,
};
use crate::utils::validation::{
    MAX_CUSTOMER_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_email,
    validate_optional_text, validate_required_text,
};
use crate::utils::{ApiResponse, AppError, ErrorCode};

/// Booking ids arrive from route params and stored rows alike; children are
/// grouped by this normalized form.
fn normalize_id(id: &str) -> String {
    id.trim().to_string()
}

/// Query params for listing bookings
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Filter by status (optional)
    pub status: Option<String>,
    /// Page offset (default 0)
    #[serde(default)]
    pub offset: i64,
    /// Page limit (default 100)
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    100
}

/// Payload for the status-only update
#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

// =============================================================================
// Reads (composition)
// =============================================================================

/// GET /api/bookings - 获取预订列表 (含全部子记录)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<Vec<BookingDetails>>>> {
    let status = match &query.status {
        None => None,
        Some(raw) => Some(
            BookingStatus::parse(raw)
                .ok_or_else(|| {
                    AppError::with_message(
                        ErrorCode::InvalidBookingStatus,
                        format!("Unknown booking status: {raw}"),
                    )
                })?
                .as_str(),
        ),
    };

    let bookings = booking_repo::list(&state.db, status, query.limit.max(1), query.offset.max(0))
        .await
        .map_err(db_error("Failed to fetch bookings"))?;

    let details = compose_details(&state, bookings).await?;
    Ok(ok(details))
}

/// GET /api/bookings/:id - 获取单个预订 (含全部子记录)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<BookingDetails>>> {
    let id = normalize_id(&id);
    let booking = booking_repo::find_by_id(&state.db, &id)
        .await
        .map_err(db_error("Failed to fetch booking"))?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::BookingNotFound, format!("Booking {id} not found"))
        })?;

    let mut details = compose_details(&state, vec![booking]).await?;
    // compose_details preserves input order and length
    details
        .pop()
        .ok_or_else(|| AppError::internal("Booking composition returned no rows"))
        .map(|d| ok(d))
}

/// Merge bookings with their child records, batched across the whole set
///
/// 子记录查询用 `ANY($ids)` 一次取回，再按预订号分组装配，
/// 避免每个预订一轮查询。
async fn compose_details(
    state: &ServerState,
    bookings: Vec<Booking>,
) -> Result<Vec<BookingDetails>, AppError> {
    if bookings.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<String> = bookings.iter().map(|b| normalize_id(&b.booking_id)).collect();

    let vehicle_rows = booking_repo::vehicle_details_for(&state.db, &ids)
        .await
        .map_err(db_error("Failed to fetch vehicle bookings"))?;
    let van_rows = booking_repo::van_rental_details_for(&state.db, &ids)
        .await
        .map_err(db_error("Failed to fetch van rentals"))?;
    let diving_rows = booking_repo::diving_details_for(&state.db, &state.schema, &ids)
        .await
        .map_err(db_error("Failed to fetch diving bookings"))?;
    let payment_rows = payment_repo::latest_for_bookings(&state.db, &ids)
        .await
        .map_err(db_error("Failed to fetch payments"))?;

    let mut hotel_ids: Vec<i64> = bookings.iter().filter_map(|b| b.hotel_id).collect();
    hotel_ids.sort_unstable();
    hotel_ids.dedup();
    let hotels = if hotel_ids.is_empty() {
        Vec::new()
    } else {
        hotel_repo::find_by_ids(&state.db, &hotel_ids)
            .await
            .map_err(db_error("Failed to fetch hotels"))?
    };

    let mut vehicles_by_booking: HashMap<String, Vec<_>> = HashMap::new();
    for row in vehicle_rows {
        vehicles_by_booking
            .entry(normalize_id(&row.booking_id))
            .or_default()
            .push(row);
    }
    let mut vans_by_booking: HashMap<String, Vec<_>> = HashMap::new();
    for row in van_rows {
        vans_by_booking
            .entry(normalize_id(&row.booking_id))
            .or_default()
            .push(row);
    }
    let mut diving_by_booking: HashMap<String, Vec<_>> = HashMap::new();
    for row in diving_rows {
        diving_by_booking
            .entry(normalize_id(&row.booking_id))
            .or_default()
            .push(row);
    }
    let mut payment_by_booking: HashMap<String, Payment> = payment_rows
        .into_iter()
        .map(|p| (normalize_id(&p.booking_id), p))
        .collect();
    let hotel_by_id: HashMap<i64, Hotel> = hotels.into_iter().map(|h| (h.id, h)).collect();

    let details = bookings
        .into_iter()
        .map(|booking| {
            let key = normalize_id(&booking.booking_id);
            let hotel = booking.hotel_id.and_then(|id| hotel_by_id.get(&id).cloned());
            BookingDetails {
                hotel,
                vehicle_bookings: vehicles_by_booking.remove(&key).unwrap_or_default(),
                van_rentals: vans_by_booking.remove(&key).unwrap_or_default(),
                diving_bookings: diving_by_booking.remove(&key).unwrap_or_default(),
                payment: payment_by_booking.remove(&key),
                booking,
            }
        })
        .collect();

    Ok(details)
}

// =============================================================================
// Writes
// =============================================================================

fn validate_write(payload: &BookingWrite) -> Result<(), AppError> {
    payload.validate()?;
    validate_required_text(&payload.first_name, "first_name", MAX_CUSTOMER_NAME_LEN)?;
    validate_required_text(&payload.last_name, "last_name", MAX_CUSTOMER_NAME_LEN)?;
    validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.notes, "notes", MAX_NOTE_LEN)?;
    if let Some(email) = &payload.email
        && !email.trim().is_empty()
    {
        validate_email(email)?;
    }
    Ok(())
}

/// POST /api/bookings - 创建预订
///
/// 分配当年下一个预订号，写入父行和子集合，按需建立支付记录，
/// 最后发送确认邮件 (后台任务，失败只记日志)。
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<BookingWrite>,
) -> AppResult<Json<ApiResponse<BookingDetails>>> {
    validate_write(&payload)?;
    let booking_type = payload.normalized_type()?;
    let status = payload.normalized_status()?;

    let booking_id = booking_repo::next_booking_id(&state.db, Utc::now().date_naive())
        .await
        .map_err(|e| {
            AppError::new(ErrorCode::BookingIdAllocationFailed).with_detail(e.to_string())
        })?;

    let booking = booking_repo::create(
        &state.db,
        &state.schema,
        &booking_id,
        &payload,
        &booking_type,
        status.as_str(),
    )
    .await
    .map_err(db_error("Failed to create booking"))?;

    write_children(&state, &booking_id, &payload).await?;
    let details = finish_write(&state, booking, &payload).await?;

    // 确认邮件后台发送，预订创建不因邮件失败而失败
    if let (Some(mailer), Some(email)) = (state.mailer.clone(), details.booking.email.clone()) {
        let booking_id = details.booking.booking_id.clone();
        let first_name = details.booking.first_name.clone();
        let check_in = details.booking.check_in;
        tokio::spawn(async move {
            if let Err(e) = mailer
                .send_booking_confirmation(&email, &booking_id, &first_name, check_in)
                .await
            {
                tracing::warn!(
                    booking_id = %booking_id,
                    error = %e,
                    "Booking confirmation email failed"
                );
            }
        });
    }

    Ok(ok_with_message(details, "Booking created successfully"))
}

/// PUT /api/bookings/:id - 更新预订
///
/// 提交的每个子集合整体替换 (先清后插)；未提交的集合保持不变。
/// 无显式总额时按子记录金额之和回填。
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<BookingWrite>,
) -> AppResult<Json<ApiResponse<BookingDetails>>> {
    let id = normalize_id(&id);
    validate_write(&payload)?;
    let booking_type = payload.normalized_type()?;
    let status = payload.normalized_status()?;

    let booking = booking_repo::update(
        &state.db,
        &state.schema,
        &id,
        &payload,
        &booking_type,
        status.as_str(),
    )
    .await
    .map_err(db_error("Failed to update booking"))?
    .ok_or_else(|| {
        AppError::with_message(ErrorCode::BookingNotFound, format!("Booking {id} not found"))
    })?;

    write_children(&state, &id, &payload).await?;
    let details = finish_write(&state, booking, &payload).await?;

    Ok(ok_with_message(details, "Booking updated successfully"))
}

/// Replace each submitted child collection (purge-then-insert)
async fn write_children(
    state: &ServerState,
    booking_id: &str,
    payload: &BookingWrite,
) -> Result<(), AppError> {
    if let Some(vehicles) = &payload.vehicles {
        booking_repo::replace_vehicle_bookings(&state.db, booking_id, vehicles)
            .await
            .map_err(db_error("Failed to save vehicle bookings"))?;
    }
    if let Some(van_rentals) = &payload.van_rentals {
        booking_repo::replace_van_rentals(&state.db, booking_id, van_rentals)
            .await
            .map_err(db_error("Failed to save van rentals"))?;
    }
    if let Some(diving) = &payload.diving {
        booking_repo::replace_diving_bookings(&state.db, &state.schema, booking_id, diving)
            .await
            .map_err(db_error("Failed to save diving bookings"))?;
    }
    Ok(())
}

/// Recompute the derived total, settle the payment row, and return the
/// composed booking
async fn finish_write(
    state: &ServerState,
    booking: Booking,
    payload: &BookingWrite,
) -> Result<BookingDetails, AppError> {
    let booking_id = normalize_id(&booking.booking_id);

    let mut details = compose_details(state, vec![booking]).await?;
    let mut details = details
        .pop()
        .ok_or_else(|| AppError::internal("Booking composition returned no rows"))?;

    if payload.has_payment() {
        let child_amounts = details
            .vehicle_bookings
            .iter()
            .map(|v| v.amount)
            .chain(details.van_rentals.iter().map(|v| v.amount))
            .chain(details.diving_bookings.iter().map(|d| d.amount));
        let total = fallback_total(payload.total_amount, child_amounts);
        let paid = payload.amount_paid.unwrap_or(Decimal::ZERO);

        let payment = payment_repo::upsert(
            &state.db,
            &booking_id,
            total,
            paid,
            payload.payment_method.as_deref(),
            payload.payment_date,
        )
        .await
        .map_err(db_error("Failed to save payment"))?;
        details.payment = Some(payment);
    } else {
        payment_repo::delete_for_booking(&state.db, &booking_id)
            .await
            .map_err(db_error("Failed to clear payment"))?;
        details.payment = None;
    }

    Ok(details)
}

/// PUT /api/bookings/:id/status - 更新预订状态
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<StatusUpdate>,
) -> AppResult<Json<ApiResponse<Booking>>> {
    let id = normalize_id(&id);
    let status = BookingStatus::parse(&payload.status).ok_or_else(|| {
        AppError::with_message(
            ErrorCode::InvalidBookingStatus,
            format!("Unknown booking status: {}", payload.status),
        )
    })?;

    let booking = booking_repo::update_status(&state.db, &id, status.as_str())
        .await
        .map_err(db_error("Failed to update booking status"))?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::BookingNotFound, format!("Booking {id} not found"))
        })?;

    Ok(ok_with_message(booking, "Booking status updated"))
}

/// DELETE /api/bookings/:id - 删除预订 (子记录与支付随外键级联)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<bool>>> {
    let id = normalize_id(&id);
    let deleted = booking_repo::delete(&state.db, &id)
        .await
        .map_err(db_error("Failed to delete booking"))?;

    if !deleted {
        return Err(AppError::with_message(
            ErrorCode::BookingNotFound,
            format!("Booking {id} not found"),
        ));
    }

    Ok(ok_with_message(true, "Booking deleted"))
}
