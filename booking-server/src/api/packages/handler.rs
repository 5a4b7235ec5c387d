//! Package API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use rust_decimal::Decimal;

use crate::api::{AppResult, db_error, ok, ok_with_message};
use crate::core::ServerState;
use crate::db::models::{Package, PackageCreate, PackageUpdate};
use crate::db::repository::{RepoError, package as package_repo};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_URL_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{ApiResponse, AppError, ErrorCode};

/// GET /api/packages - 获取所有套餐
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<Vec<Package>>>> {
    let packages = package_repo::find_all(&state.db)
        .await
        .map_err(db_error("Failed to fetch packages"))?;
    Ok(ok(packages))
}

/// GET /api/packages/:id - 获取单个套餐
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Package>>> {
    let package = package_repo::find_by_id(&state.db, id)
        .await
        .map_err(db_error("Failed to fetch package"))?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::PackageNotFound, format!("Package {id} not found"))
        })?;
    Ok(ok(package))
}

/// POST /api/packages - 创建套餐
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<PackageCreate>,
) -> AppResult<Json<ApiResponse<Package>>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.inclusions, "inclusions", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.image_url, "image_url", MAX_URL_LEN)?;
    if payload.price.is_some_and(|p| p < Decimal::ZERO) {
        return Err(AppError::validation("price must not be negative"));
    }

    let package = package_repo::create(&state.db, payload)
        .await
        .map_err(db_error("Failed to create package"))?;
    Ok(ok_with_message(package, "Package created successfully"))
}

/// PUT /api/packages/:id - 更新套餐
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<PackageUpdate>,
) -> AppResult<Json<ApiResponse<Package>>> {
    validate_optional_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.inclusions, "inclusions", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.image_url, "image_url", MAX_URL_LEN)?;
    if payload.price.is_some_and(|p| p < Decimal::ZERO) {
        return Err(AppError::validation("price must not be negative"));
    }

    let package = package_repo::update(&state.db, id, payload)
        .await
        .map_err(db_error("Failed to update package"))?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::PackageNotFound, format!("Package {id} not found"))
        })?;
    Ok(ok_with_message(package, "Package updated successfully"))
}

/// DELETE /api/packages/:id - 删除套餐 (被预订引用时返回 409)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<bool>>> {
    let deleted = package_repo::delete(&state.db, id)
        .await
        .map_err(|e| match e {
            RepoError::InUse(msg) => AppError::with_message(ErrorCode::CatalogInUse, msg),
            other => db_error("Failed to delete package")(other),
        })?;

    if !deleted {
        return Err(AppError::with_message(
            ErrorCode::PackageNotFound,
            format!("Package {id} not found"),
        ));
    }
    Ok(ok_with_message(true, "Package deleted"))
}
