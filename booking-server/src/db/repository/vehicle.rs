//! Vehicle Repository

use rust_decimal::Decimal;
use sqlx::PgPool;

use super::{RepoError, RepoResult, is_foreign_key_violation};
use crate::db::models::{Vehicle, VehicleCreate, VehicleUpdate};

pub async fn find_all(pool: &PgPool) -> RepoResult<Vec<Vehicle>> {
    let vehicles = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles ORDER BY name")
        .fetch_all(pool)
        .await?;
    Ok(vehicles)
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> RepoResult<Option<Vehicle>> {
    let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(vehicle)
}

pub async fn create(pool: &PgPool, data: VehicleCreate) -> RepoResult<Vehicle> {
    let vehicle = sqlx::query_as::<_, Vehicle>(
        "INSERT INTO vehicles (name, vehicle_type, plate_number, daily_rate, seats, image_url) \
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
    )
    .bind(data.name.trim())
    .bind(&data.vehicle_type)
    .bind(&data.plate_number)
    .bind(data.daily_rate.unwrap_or(Decimal::ZERO))
    .bind(data.seats)
    .bind(&data.image_url)
    .fetch_one(pool)
    .await?;
    Ok(vehicle)
}

/// Partial update; unset fields keep their stored value
pub async fn update(pool: &PgPool, id: i64, data: VehicleUpdate) -> RepoResult<Option<Vehicle>> {
    let vehicle = sqlx::query_as::<_, Vehicle>(
        "UPDATE vehicles SET \
            name = COALESCE($2, name), \
            vehicle_type = COALESCE($3, vehicle_type), \
            plate_number = COALESCE($4, plate_number), \
            daily_rate = COALESCE($5, daily_rate), \
            seats = COALESCE($6, seats), \
            image_url = COALESCE($7, image_url), \
            is_available = COALESCE($8, is_available) \
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.vehicle_type)
    .bind(&data.plate_number)
    .bind(data.daily_rate)
    .bind(data.seats)
    .bind(&data.image_url)
    .bind(data.is_available)
    .fetch_optional(pool)
    .await?;
    Ok(vehicle)
}

/// Delete; fails with [`RepoError::InUse`] while vehicle bookings reference it
pub async fn delete(pool: &PgPool, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await;
    match result {
        Ok(r) => Ok(r.rows_affected() > 0),
        Err(e) if is_foreign_key_violation(&e) => Err(RepoError::InUse(format!(
            "Vehicle {id} is referenced by existing vehicle bookings"
        ))),
        Err(e) => Err(e.into()),
    }
}
