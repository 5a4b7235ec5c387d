//! Tour Repository

use rust_decimal::Decimal;
use sqlx::PgPool;

use super::RepoResult;
use crate::db::models::{Tour, TourCreate, TourUpdate};

pub async fn find_all(pool: &PgPool) -> RepoResult<Vec<Tour>> {
    let tours = sqlx::query_as::<_, Tour>("SELECT * FROM tours ORDER BY name")
        .fetch_all(pool)
        .await?;
    Ok(tours)
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> RepoResult<Option<Tour>> {
    let tour = sqlx::query_as::<_, Tour>("SELECT * FROM tours WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(tour)
}

pub async fn create(pool: &PgPool, data: TourCreate) -> RepoResult<Tour> {
    let tour = sqlx::query_as::<_, Tour>(
        "INSERT INTO tours (name, description, price, image_url) \
         VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(data.name.trim())
    .bind(&data.description)
    .bind(data.price.unwrap_or(Decimal::ZERO))
    .bind(&data.image_url)
    .fetch_one(pool)
    .await?;
    Ok(tour)
}

/// Partial update; unset fields keep their stored value
pub async fn update(pool: &PgPool, id: i64, data: TourUpdate) -> RepoResult<Option<Tour>> {
    let tour = sqlx::query_as::<_, Tour>(
        "UPDATE tours SET \
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
    Ok(tour)
}

pub async fn delete(pool: &PgPool, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM tours WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
