//! Diving Service API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use rust_decimal::Decimal;

use crate::api::{AppResult, db_error, ok, ok_with_message};
use crate::core::ServerState;
use crate::db::models::{DivingService, DivingServiceCreate, DivingServiceUpdate};
use crate::db::repository::{RepoError, diving_service as diving_repo};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_URL_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{ApiResponse, AppError, ErrorCode};

/// GET /api/diving - 获取所有潜水服务
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<DivingService>>>> {
    let services = diving_repo::find_all(&state.db)
        .await
        .map_err(db_error("Failed to fetch diving services"))?;
    Ok(ok(services))
}

/// GET /api/diving/:id - 获取单个潜水服务
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<DivingService>>> {
    let service = diving_repo::find_by_id(&state.db, id)
        .await
        .map_err(db_error("Failed to fetch diving service"))?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::DivingServiceNotFound,
                format!("Diving service {id} not found"),
            )
        })?;
    Ok(ok(service))
}

/// POST /api/diving - 创建潜水服务
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<DivingServiceCreate>,
) -> AppResult<Json<ApiResponse<DivingService>>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.image_url, "image_url", MAX_URL_LEN)?;
    if payload.price.is_some_and(|p| p < Decimal::ZERO) {
        return Err(AppError::validation("price must not be negative"));
    }

    let service = diving_repo::create(&state.db, payload)
        .await
        .map_err(db_error("Failed to create diving service"))?;
    Ok(ok_with_message(service, "Diving service created successfully"))
}

/// PUT /api/diving/:id - 更新潜水服务
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<DivingServiceUpdate>,
) -> AppResult<Json<ApiResponse<DivingService>>> {
    validate_optional_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.image_url, "image_url", MAX_URL_LEN)?;
    if payload.price.is_some_and(|p| p < Decimal::ZERO) {
        return Err(AppError::validation("price must not be negative"));
    }

    let service = diving_repo::update(&state.db, id, payload)
        .await
        .map_err(db_error("Failed to update diving service"))?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::DivingServiceNotFound,
                format!("Diving service {id} not found"),
            )
        })?;
    Ok(ok_with_message(service, "Diving service updated successfully"))
}

/// DELETE /api/diving/:id - 删除潜水服务 (被预订引用时返回 409)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<bool>>> {
    let deleted = diving_repo::delete(&state.db, id).await.map_err(|e| match e {
        RepoError::InUse(msg) => AppError::with_message(ErrorCode::CatalogInUse, msg),
        other => db_error("Failed to delete diving service")(other),
    })?;

    if !deleted {
        return Err(AppError::with_message(
            ErrorCode::DivingServiceNotFound,
            format!("Diving service {id} not found"),
        ));
    }
    Ok(ok_with_message(true, "Diving service deleted"))
}
