//! Van Destination Repository

use rust_decimal::Decimal;
use sqlx::PgPool;

use super::{RepoError, RepoResult, is_foreign_key_violation};
use crate::db::models::{VanDestination, VanDestinationCreate, VanDestinationUpdate};

pub async fn find_all(pool: &PgPool) -> RepoResult<Vec<VanDestination>> {
    let destinations =
        sqlx::query_as::<_, VanDestination>("SELECT * FROM van_destinations ORDER BY destination")
            .fetch_all(pool)
            .await?;
    Ok(destinations)
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> RepoResult<Option<VanDestination>> {
    let destination =
        sqlx::query_as::<_, VanDestination>("SELECT * FROM van_destinations WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(destination)
}

pub async fn create(pool: &PgPool, data: VanDestinationCreate) -> RepoResult<VanDestination> {
    let destination = sqlx::query_as::<_, VanDestination>(
        "INSERT INTO van_destinations (destination, rate, image_url) \
         VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(data.destination.trim())
    .bind(data.rate.unwrap_or(Decimal::ZERO))
    .bind(&data.image_url)
    .fetch_one(pool)
    .await?;
    Ok(destination)
}

/// Partial update; unset fields keep their stored value
pub async fn update(
    pool: &PgPool,
    id: i64,
    data: VanDestinationUpdate,
) -> RepoResult<Option<VanDestination>> {
    let destination = sqlx::query_as::<_, VanDestination>(
        "UPDATE van_destinations SET \
            destination = COALESCE($2, destination), \
            rate = COALESCE($3, rate), \
            image_url = COALESCE($4, image_url) \
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(&data.destination)
    .bind(data.rate)
    .bind(&data.image_url)
    .fetch_optional(pool)
    .await?;
    Ok(destination)
}

/// Delete; fails with [`RepoError::InUse`] while van rentals reference it
pub async fn delete(pool: &PgPool, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM van_destinations WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await;
    match result {
        Ok(r) => Ok(r.rows_affected() > 0),
        Err(e) if is_foreign_key_violation(&e) => Err(RepoError::InUse(format!(
            "Van destination {id} is referenced by existing van rentals"
        ))),
        Err(e) => Err(e.into()),
    }
}
