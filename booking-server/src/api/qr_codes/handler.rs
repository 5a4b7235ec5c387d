//! QR Code API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::{AppResult, db_error, ok, ok_with_message};
use crate::core::ServerState;
use crate::db::models::{QrCode, QrCodeCreate, QrCodeUpdate};
use crate::db::repository::qr_code as qr_code_repo;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_URL_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{ApiResponse, AppError, ErrorCode};

/// GET /api/qr-codes - 获取所有收款二维码
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<Vec<QrCode>>>> {
    let codes = qr_code_repo::find_all(&state.db)
        .await
        .map_err(db_error("Failed to fetch QR codes"))?;
    Ok(ok(codes))
}

/// GET /api/qr-codes/:id - 获取单个二维码
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<QrCode>>> {
    let code = qr_code_repo::find_by_id(&state.db, id)
        .await
        .map_err(db_error("Failed to fetch QR code"))?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::QrCodeNotFound, format!("QR code {id} not found"))
        })?;
    Ok(ok(code))
}

/// POST /api/qr-codes - 创建二维码
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<QrCodeCreate>,
) -> AppResult<Json<ApiResponse<QrCode>>> {
    validate_required_text(&payload.label, "label", MAX_NAME_LEN)?;
    validate_optional_text(&payload.account_name, "account_name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.image_url, "image_url", MAX_URL_LEN)?;

    let code = qr_code_repo::create(&state.db, payload)
        .await
        .map_err(db_error("Failed to create QR code"))?;
    Ok(ok_with_message(code, "QR code created successfully"))
}

/// PUT /api/qr-codes/:id - 更新二维码
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<QrCodeUpdate>,
) -> AppResult<Json<ApiResponse<QrCode>>> {
    validate_optional_text(&payload.label, "label", MAX_NAME_LEN)?;
    validate_optional_text(&payload.account_name, "account_name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.image_url, "image_url", MAX_URL_LEN)?;

    let code = qr_code_repo::update(&state.db, id, payload)
        .await
        .map_err(db_error("Failed to update QR code"))?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::QrCodeNotFound, format!("QR code {id} not found"))
        })?;
    Ok(ok_with_message(code, "QR code updated successfully"))
}

/// DELETE /api/qr-codes/:id - 删除二维码
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<bool>>> {
    let deleted = qr_code_repo::delete(&state.db, id)
        .await
        .map_err(db_error("Failed to delete QR code"))?;

    if !deleted {
        return Err(AppError::with_message(
            ErrorCode::QrCodeNotFound,
            format!("QR code {id} not found"),
        ));
    }
    Ok(ok_with_message(true, "QR code deleted"))
}
