//! Tour API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use rust_decimal::Decimal;

use crate::api::{AppResult, db_error, ok, ok_with_message};
use crate::core::ServerState;
use crate::db::models::{Tour, TourCreate, TourUpdate};
use crate::db::repository::tour as tour_repo;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_URL_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{ApiResponse, AppError, ErrorCode};

/// GET /api/tours - 获取所有行程
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<Vec<Tour>>>> {
    let tours = tour_repo::find_all(&state.db)
        .await
        .map_err(db_error("Failed to fetch tours"))?;
    Ok(ok(tours))
}

/// GET /api/tours/:id - 获取单个行程
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Tour>>> {
    let tour = tour_repo::find_by_id(&state.db, id)
        .await
        .map_err(db_error("Failed to fetch tour"))?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::TourNotFound, format!("Tour {id} not found"))
        })?;
    Ok(ok(tour))
}

fn validate_fields(
    name: &Option<String>,
    description: &Option<String>,
    image_url: &Option<String>,
    price: Option<Decimal>,
) -> Result<(), AppError> {
    validate_optional_text(name, "name", MAX_NAME_LEN)?;
    validate_optional_text(description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(image_url, "image_url", MAX_URL_LEN)?;
    if price.is_some_and(|p| p < Decimal::ZERO) {
        return Err(AppError::validation("price must not be negative"));
    }
    Ok(())
}

/// POST /api/tours - 创建行程
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<TourCreate>,
) -> AppResult<Json<ApiResponse<Tour>>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_fields(&None, &payload.description, &payload.image_url, payload.price)?;

    let tour = tour_repo::create(&state.db, payload)
        .await
        .map_err(db_error("Failed to create tour"))?;
    Ok(ok_with_message(tour, "Tour created successfully"))
}

/// PUT /api/tours/:id - 更新行程
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<TourUpdate>,
) -> AppResult<Json<ApiResponse<Tour>>> {
    validate_fields(
        &payload.name,
        &payload.description,
        &payload.image_url,
        payload.price,
    )?;

    let tour = tour_repo::update(&state.db, id, payload)
        .await
        .map_err(db_error("Failed to update tour"))?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::TourNotFound, format!("Tour {id} not found"))
        })?;
    Ok(ok_with_message(tour, "Tour updated successfully"))
}

/// DELETE /api/tours/:id - 删除行程
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<bool>>> {
    let deleted = tour_repo::delete(&state.db, id)
        .await
        .map_err(db_error("Failed to delete tour"))?;

    if !deleted {
        return Err(AppError::with_message(
            ErrorCode::TourNotFound,
            format!("Tour {id} not found"),
        ));
    }
    Ok(ok_with_message(true, "Tour deleted"))
}
