//! Van Destination API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use rust_decimal::Decimal;

use crate::api::{AppResult, db_error, ok, ok_with_message};
use crate::core::ServerState;
use crate::db::models::{VanDestination, VanDestinationCreate, VanDestinationUpdate};
use crate::db::repository::{RepoError, van_destination as destination_repo};
use crate::utils::validation::{MAX_NAME_LEN, MAX_URL_LEN, validate_optional_text, validate_required_text};
use crate::utils::{ApiResponse, AppError, ErrorCode};

/// GET /api/van-destinations - 获取所有面包车目的地
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<VanDestination>>>> {
    let destinations = destination_repo::find_all(&state.db)
        .await
        .map_err(db_error("Failed to fetch van destinations"))?;
    Ok(ok(destinations))
}

/// GET /api/van-destinations/:id - 获取单个目的地
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<VanDestination>>> {
    let destination = destination_repo::find_by_id(&state.db, id)
        .await
        .map_err(db_error("Failed to fetch van destination"))?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::VanDestinationNotFound,
                format!("Van destination {id} not found"),
            )
        })?;
    Ok(ok(destination))
}

/// POST /api/van-destinations - 创建目的地
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<VanDestinationCreate>,
) -> AppResult<Json<ApiResponse<VanDestination>>> {
    validate_required_text(&payload.destination, "destination", MAX_NAME_LEN)?;
    validate_optional_text(&payload.image_url, "image_url", MAX_URL_LEN)?;
    if payload.rate.is_some_and(|r| r < Decimal::ZERO) {
        return Err(AppError::validation("rate must not be negative"));
    }

    let destination = destination_repo::create(&state.db, payload)
        .await
        .map_err(db_error("Failed to create van destination"))?;
    Ok(ok_with_message(destination, "Van destination created successfully"))
}

/// PUT /api/van-destinations/:id - 更新目的地
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<VanDestinationUpdate>,
) -> AppResult<Json<ApiResponse<VanDestination>>> {
    validate_optional_text(&payload.destination, "destination", MAX_NAME_LEN)?;
    validate_optional_text(&payload.image_url, "image_url", MAX_URL_LEN)?;
    if payload.rate.is_some_and(|r| r < Decimal::ZERO) {
        return Err(AppError::validation("rate must not be negative"));
    }

    let destination = destination_repo::update(&state.db, id, payload)
        .await
        .map_err(db_error("Failed to update van destination"))?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::VanDestinationNotFound,
                format!("Van destination {id} not found"),
            )
        })?;
    Ok(ok_with_message(destination, "Van destination updated successfully"))
}

/// DELETE /api/van-destinations/:id - 删除目的地 (被预订引用时返回 409)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<bool>>> {
    let deleted = destination_repo::delete(&state.db, id)
        .await
        .map_err(|e| match e {
            RepoError::InUse(msg) => AppError::with_message(ErrorCode::CatalogInUse, msg),
            other => db_error("Failed to delete van destination")(other),
        })?;

    if !deleted {
        return Err(AppError::with_message(
            ErrorCode::VanDestinationNotFound,
            format!("Van destination {id} not found"),
        ));
    }
    Ok(ok_with_message(true, "Van destination deleted"))
}
