//! Hotel API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use rust_decimal::Decimal;

use crate::api::{AppResult, db_error, ok, ok_with_message};
use crate::core::ServerState;
use crate::db::models::{Hotel, HotelCreate, HotelUpdate};
use crate::db::repository::{RepoError, hotel as hotel_repo};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, MAX_URL_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{ApiResponse, AppError, ErrorCode};

/// GET /api/hotels - 获取所有酒店
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<Vec<Hotel>>>> {
    let hotels = hotel_repo::find_all(&state.db)
        .await
        .map_err(db_error("Failed to fetch hotels"))?;
    Ok(ok(hotels))
}

/// GET /api/hotels/:id - 获取单个酒店
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Hotel>>> {
    let hotel = hotel_repo::find_by_id(&state.db, id)
        .await
        .map_err(db_error("Failed to fetch hotel"))?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::HotelNotFound, format!("Hotel {id} not found"))
        })?;
    Ok(ok(hotel))
}

/// POST /api/hotels - 创建酒店
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<HotelCreate>,
) -> AppResult<Json<ApiResponse<Hotel>>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.location, "location", MAX_NAME_LEN)?;
    validate_optional_text(&payload.contact_number, "contact_number", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.image_url, "image_url", MAX_URL_LEN)?;
    if payload.room_rate.is_some_and(|r| r < Decimal::ZERO) {
        return Err(AppError::validation("room_rate must not be negative"));
    }

    let hotel = hotel_repo::create(&state.db, payload)
        .await
        .map_err(db_error("Failed to create hotel"))?;
    Ok(ok_with_message(hotel, "Hotel created successfully"))
}

/// PUT /api/hotels/:id - 更新酒店
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<HotelUpdate>,
) -> AppResult<Json<ApiResponse<Hotel>>> {
    validate_optional_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.image_url, "image_url", MAX_URL_LEN)?;
    if payload.room_rate.is_some_and(|r| r < Decimal::ZERO) {
        return Err(AppError::validation("room_rate must not be negative"));
    }

    let hotel = hotel_repo::update(&state.db, id, payload)
        .await
        .map_err(db_error("Failed to update hotel"))?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::HotelNotFound, format!("Hotel {id} not found"))
        })?;
    Ok(ok_with_message(hotel, "Hotel updated successfully"))
}

/// DELETE /api/hotels/:id - 删除酒店 (被预订引用时返回 409)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<bool>>> {
    let deleted = hotel_repo::delete(&state.db, id).await.map_err(|e| match e {
        RepoError::InUse(msg) => AppError::with_message(ErrorCode::CatalogInUse, msg),
        other => db_error("Failed to delete hotel")(other),
    })?;

    if !deleted {
        return Err(AppError::with_message(
            ErrorCode::HotelNotFound,
            format!("Hotel {id} not found"),
        ));
    }
    Ok(ok_with_message(true, "Hotel deleted"))
}
