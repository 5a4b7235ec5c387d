//! Hotel Repository

use sqlx::PgPool;

use super::{RepoError, RepoResult, is_foreign_key_violation};
use crate::db::models::{Hotel, HotelCreate, HotelUpdate};

pub async fn find_all(pool: &PgPool) -> RepoResult<Vec<Hotel>> {
    let hotels = sqlx::query_as::<_, Hotel>("SELECT * FROM hotels ORDER BY name")
        .fetch_all(pool)
        .await?;
    Ok(hotels)
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> RepoResult<Option<Hotel>> {
    let hotel = sqlx::query_as::<_, Hotel>("SELECT * FROM hotels WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(hotel)
}

/// Batched lookup for booking composition
pub async fn find_by_ids(pool: &PgPool, ids: &[i64]) -> RepoResult<Vec<Hotel>> {
    let hotels = sqlx::query_as::<_, Hotel>("SELECT * FROM hotels WHERE id = ANY($1)")
        .bind(ids)
        .fetch_all(pool)
        .await?;
    Ok(hotels)
}

pub async fn create(pool: &PgPool, data: HotelCreate) -> RepoResult<Hotel> {
    let hotel = sqlx::query_as::<_, Hotel>(
        "INSERT INTO hotels (name, location, contact_number, room_rate, image_url) \
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(data.name.trim())
    .bind(&data.location)
    .bind(&data.contact_number)
    .bind(data.room_rate)
    .bind(&data.image_url)
    .fetch_one(pool)
    .await?;
    Ok(hotel)
}

/// Partial update; unset fields keep their stored value
pub async fn update(pool: &PgPool, id: i64, data: HotelUpdate) -> RepoResult<Option<Hotel>> {
    let hotel = sqlx::query_as::<_, Hotel>(
        "UPDATE hotels SET \
            name = COALESCE($2, name), \
            location = COALESCE($3, location), \
            contact_number = COALESCE($4, contact_number), \
            room_rate = COALESCE($5, room_rate), \
            image_url = COALESCE($6, image_url) \
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.location)
    .bind(&data.contact_number)
    .bind(data.room_rate)
    .bind(&data.image_url)
    .fetch_optional(pool)
    .await?;
    Ok(hotel)
}

/// Delete a hotel; fails with [`RepoError::InUse`] while bookings reference it
pub async fn delete(pool: &PgPool, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM hotels WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await;
    match result {
        Ok(r) => Ok(r.rows_affected() > 0),
        Err(e) if is_foreign_key_violation(&e) => Err(RepoError::InUse(format!(
            "Hotel {id} is referenced by existing bookings"
        ))),
        Err(e) => Err(e.into()),
    }
}
