//! Payment Repository
//!
//! 每个预订一条逻辑支付记录：写入时更新最新一行，没有则插入；
//! 读取时按 `created_at` 取最新。

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

use super::RepoResult;
use crate::db::models::Payment;

/// Latest payment row for one booking
pub async fn latest_for_booking(pool: &PgPool, booking_id: &str) -> RepoResult<Option<Payment>> {
    let payment = sqlx::query_as::<_, Payment>(
        "SELECT * FROM payments WHERE booking_id = $1 \
         ORDER BY created_at DESC, id DESC LIMIT 1",
    )
    .bind(booking_id)
    .fetch_optional(pool)
    .await?;
    Ok(payment)
}

/// Latest payment row per booking, batched
pub async fn latest_for_bookings(
    pool: &PgPool,
    booking_ids: &[String],
) -> RepoResult<Vec<Payment>> {
    let payments = sqlx::query_as::<_, Payment>(
        "SELECT DISTINCT ON (booking_id) * FROM payments \
         WHERE booking_id = ANY($1) \
         ORDER BY booking_id, created_at DESC, id DESC",
    )
    .bind(booking_ids)
    .fetch_all(pool)
    .await?;
    Ok(payments)
}

/// Latest payment row per booking across all bookings
pub async fn list_latest(pool: &PgPool) -> RepoResult<Vec<Payment>> {
    let payments = sqlx::query_as::<_, Payment>(
        "SELECT DISTINCT ON (booking_id) * FROM payments \
         ORDER BY booking_id, created_at DESC, id DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(payments)
}

/// Write the payment record for a booking
///
/// Updates the latest row in place when one exists, otherwise inserts.
/// `remaining_balance` is always recomputed from total and paid.
pub async fn upsert(
    pool: &PgPool,
    booking_id: &str,
    total_amount: Decimal,
    amount_paid: Decimal,
    payment_method: Option<&str>,
    payment_date: Option<NaiveDate>,
) -> RepoResult<Payment> {
    let remaining = total_amount - amount_paid;

    let updated = sqlx::query_as::<_, Payment>(
        "UPDATE payments SET total_amount = $2, amount_paid = $3, remaining_balance = $4, \
                payment_method = $5, payment_date = $6 \
         WHERE id = (SELECT id FROM payments WHERE booking_id = $1 \
                     ORDER BY created_at DESC, id DESC LIMIT 1) \
         RETURNING *",
    )
    .bind(booking_id)
    .bind(total_amount)
    .bind(amount_paid)
    .bind(remaining)
    .bind(payment_method)
    .bind(payment_date)
    .fetch_optional(pool)
    .await?;

    if let Some(payment) = updated {
        return Ok(payment);
    }

    let inserted = sqlx::query_as::<_, Payment>(
        "INSERT INTO payments \
            (booking_id, total_amount, amount_paid, remaining_balance, payment_method, payment_date) \
         VALUES ($1, $2, $3, $4, $5, $6) \
         RETURNING *",
    )
    .bind(booking_id)
    .bind(total_amount)
    .bind(amount_paid)
    .bind(remaining)
    .bind(payment_method)
    .bind(payment_date)
    .fetch_one(pool)
    .await?;
    Ok(inserted)
}

/// Remove all payment rows of a booking
pub async fn delete_for_booking(pool: &PgPool, booking_id: &str) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM payments WHERE booking_id = $1")
        .bind(booking_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
