//! QR Code Repository

use sqlx::PgPool;

use super::RepoResult;
use crate::db::models::{QrCode, QrCodeCreate, QrCodeUpdate};

pub async fn find_all(pool: &PgPool) -> RepoResult<Vec<QrCode>> {
    let codes = sqlx::query_as::<_, QrCode>("SELECT * FROM qr_codes ORDER BY label")
        .fetch_all(pool)
        .await?;
    Ok(codes)
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> RepoResult<Option<QrCode>> {
    let code = sqlx::query_as::<_, QrCode>("SELECT * FROM qr_codes WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(code)
}

pub async fn create(pool: &PgPool, data: QrCodeCreate) -> RepoResult<QrCode> {
    let code = sqlx::query_as::<_, QrCode>(
        "INSERT INTO qr_codes (label, account_name, image_url) \
         VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(data.label.trim())
    .bind(&data.account_name)
    .bind(&data.image_url)
    .fetch_one(pool)
    .await?;
    Ok(code)
}

/// Partial update; unset fields keep their stored value
pub async fn update(pool: &PgPool, id: i64, data: QrCodeUpdate) -> RepoResult<Option<QrCode>> {
    let code = sqlx::query_as::<_, QrCode>(
        "UPDATE qr_codes SET \
            label = COALESCE($2, label), \
            account_name = COALESCE($3, account_name), \
            image_url = COALESCE($4, image_url) \
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(&data.label)
    .bind(&data.account_name)
    .bind(&data.image_url)
    .fetch_optional(pool)
    .await?;
    Ok(code)
}

pub async fn delete(pool: &PgPool, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM qr_codes WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
