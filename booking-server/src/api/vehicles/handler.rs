//! Vehicle API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use rust_decimal::Decimal;

use crate::api::{AppResult, db_error, ok, ok_with_message};
use crate::core::ServerState;
use crate::db::models::{Vehicle, VehicleCreate, VehicleUpdate};
use crate::db::repository::{RepoError, vehicle as vehicle_repo};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, MAX_URL_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{ApiResponse, AppError, ErrorCode};

/// GET /api/vehicles - 获取所有车辆
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<Vec<Vehicle>>>> {
    let vehicles = vehicle_repo::find_all(&state.db)
        .await
        .map_err(db_error("Failed to fetch vehicles"))?;
    Ok(ok(vehicles))
}

/// GET /api/vehicles/:id - 获取单个车辆
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Vehicle>>> {
    let vehicle = vehicle_repo::find_by_id(&state.db, id)
        .await
        .map_err(db_error("Failed to fetch vehicle"))?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::VehicleNotFound, format!("Vehicle {id} not found"))
        })?;
    Ok(ok(vehicle))
}

fn validate_create(data: &VehicleCreate) -> Result<(), AppError> {
    validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&data.vehicle_type, "vehicle_type", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&data.plate_number, "plate_number", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&data.image_url, "image_url", MAX_URL_LEN)?;
    if data.daily_rate.is_some_and(|r| r < Decimal::ZERO) {
        return Err(AppError::validation("daily_rate must not be negative"));
    }
    Ok(())
}

/// POST /api/vehicles - 创建车辆
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<VehicleCreate>,
) -> AppResult<Json<ApiResponse<Vehicle>>> {
    validate_create(&payload)?;

    let vehicle = vehicle_repo::create(&state.db, payload)
        .await
        .map_err(db_error("Failed to create vehicle"))?;
    Ok(ok_with_message(vehicle, "Vehicle created successfully"))
}

/// PUT /api/vehicles/:id - 更新车辆
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<VehicleUpdate>,
) -> AppResult<Json<ApiResponse<Vehicle>>> {
    validate_optional_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.image_url, "image_url", MAX_URL_LEN)?;
    if payload.daily_rate.is_some_and(|r| r < Decimal::ZERO) {
        return Err(AppError::validation("daily_rate must not be negative"));
    }

    let vehicle = vehicle_repo::update(&state.db, id, payload)
        .await
        .map_err(db_error("Failed to update vehicle"))?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::VehicleNotFound, format!("Vehicle {id} not found"))
        })?;
    Ok(ok_with_message(vehicle, "Vehicle updated successfully"))
}

/// DELETE /api/vehicles/:id - 删除车辆
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<bool>>> {
    let deleted = vehicle_repo::delete(&state.db, id)
        .await
        .map_err(|e| match e {
            RepoError::InUse(msg) => AppError::with_message(ErrorCode::CatalogInUse, msg),
            other => db_error("Failed to delete vehicle")(other),
        })?;

    if !deleted {
        return Err(AppError::with_message(
            ErrorCode::VehicleNotFound,
            format!("Vehicle {id} not found"),
        ));
    }
    Ok(ok_with_message(true, "Vehicle deleted"))
}
