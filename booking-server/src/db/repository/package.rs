//! Package Repository

use rust_decimal::Decimal;
use sqlx::PgPool;

use super::{RepoError, RepoResult, is_foreign_key_violation};
use crate::db::models::{Package, PackageCreate, PackageUpdate};

pub async fn find_all(pool: &PgPool) -> RepoResult<Vec<Package>> {
    let packages = sqlx::query_as::<_, Package>("SELECT * FROM packages ORDER BY name")
        .fetch_all(pool)
        .await?;
    Ok(packages)
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> RepoResult<Option<Package>> {
    let package = sqlx::query_as::<_, Package>("SELECT * FROM packages WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(package)
}

pub async fn create(pool: &PgPool, data: PackageCreate) -> RepoResult<Package> {
    let package = sqlx::query_as::<_, Package>(
        "INSERT INTO packages (name, description, inclusions, price, image_url) \
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(data.name.trim())
    .bind(&data.description)
    .bind(&data.inclusions)
    .bind(data.price.unwrap_or(Decimal::ZERO))
    .bind(&data.image_url)
    .fetch_one(pool)
    .await?;
    Ok(package)
}

/// Partial update; unset fields keep their stored value
pub async fn update(pool: &PgPool, id: i64, data: PackageUpdate) -> RepoResult<Option<Package>> {
    let package = sqlx::query_as::<_, Package>(
        "UPDATE packages SET \
            name = COALESCE($2, name), \
            description = COALESCE($3, description), \
            inclusions = COALESCE($4, inclusions), \
            price = COALESCE($5, price), \
            image_url = COALESCE($6, image_url) \
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.description)
    .bind(&data.inclusions)
    .bind(data.price)
    .bind(&data.image_url)
    .fetch_optional(pool)
    .await?;
    Ok(package)
}

/// Delete; fails with [`RepoError::InUse`] while bookings reference it
pub async fn delete(pool: &PgPool, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM packages WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await;
    match result {
        Ok(r) => Ok(r.rows_affected() > 0),
        Err(e) if is_foreign_key_violation(&e) => Err(RepoError::InUse(format!(
            "Package {id} is referenced by existing bookings"
        ))),
        Err(e) => Err(e.into()),
    }
}
