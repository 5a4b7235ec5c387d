//! Diving Service Repository

use rust_decimal::Decimal;
use sqlx::PgPool;

use super::{RepoError, RepoResult, is_foreign_key_violation};
use crate::db::models::{DivingService, DivingServiceCreate, DivingServiceUpdate};

pub async fn find_all(pool: &PgPool) -> RepoResult<Vec<DivingService>> {
    let services = sqlx::query_as::<_, DivingService>("SELECT * FROM diving_services ORDER BY name")
        .fetch_all(pool)
        .await?;
    Ok(services)
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> RepoResult<Option<DivingService>> {
    let service = sqlx::query_as::<_, DivingService>("SELECT * FROM diving_services WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(service)
}

pub async fn create(pool: &PgPool, data: DivingServiceCreate) -> RepoResult<DivingService> {
    let service = sqlx::query_as::<_, DivingService>(
        "INSERT INTO diving_services (name, description, price, image_url) \
         VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(data.name.trim())
    .bind(&data.description)
    .bind(data.price.unwrap_or(Decimal::ZERO))
    .bind(&data.image_url)
    .fetch_one(pool)
    .await?;
    Ok(service)
}

/// Partial update; unset fields keep their stored value
pub async fn update(
    pool: &PgPool,
    id: i64,
    data: DivingServiceUpdate,
) -> RepoResult<Option<DivingService>> {
    let service = sqlx::query_as::<_, DivingService>(
        "UPDATE diving_services SET \
            name = COALESCE($2, name), \
            description = COALESCE($3, description), \
            price = COALESCE($4, price), \
            image_url = COALESCE($5, image_url) \
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.price)
    .bind(&data.image_url)
    .fetch_optional(pool)
    .await?;
    Ok(service)
}

/// Delete; fails with [`RepoError::InUse`] while diving bookings reference it
pub async fn delete(pool: &PgPool, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM diving_services WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await;
    match result {
        Ok(r) => Ok(r.rows_affected() > 0),
        Err(e) if is_foreign_key_violation(&e) => Err(RepoError::InUse(format!(
            "Diving service {id} is referenced by existing diving bookings"
        ))),
        Err(e) => Err(e.into()),
    }
}
