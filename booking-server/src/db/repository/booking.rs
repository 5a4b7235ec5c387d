//! Booking Repository
//!
//! 预订主表 + 子记录的查询与写入。
//!
//! 可选列 (`bookings.package_only_id`, `diving_bookings.diving_type`) 在旧库
//! 可能缺失：首次因缺列失败时记录到 [`SchemaFlags`] 并用缩减列集重试一次，
//! 之后的请求直接走缩减路径。

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use sqlx::PgPool;

use super::{RepoResult, is_undefined_column};
use crate::core::SchemaFlags;
use crate::db::models::{
    Booking, BookingWrite, DivingBookingDetail, DivingBookingInput, VanRentalDetail,
    VanRentalInput, VehicleBookingDetail, VehicleBookingInput,
};

// =============================================================================
// Booking id allocation (`YY-NNNN`, monotonic per calendar year)
// =============================================================================

/// Two-digit year prefix for a date, e.g. `"25-"`
fn year_prefix(date: NaiveDate) -> String {
    format!("{:02}-", date.year() % 100)
}

/// Next sequence number after the current per-year maximum
fn next_sequence(current_max: Option<i32>) -> i32 {
    current_max.unwrap_or(0) + 1
}

/// Format a booking id from its year and sequence parts
fn format_booking_id(date: NaiveDate, seq: i32) -> String {
    format!("{:02}-{:04}", date.year() % 100, seq)
}

/// Allocate the next booking id for `today`'s calendar year
///
/// Scans the numeric suffixes of existing ids under the year prefix and takes
/// max + 1; malformed suffixes are ignored. The counter restarts at 0001 when
/// the year rolls over.
pub async fn next_booking_id(pool: &PgPool, today: NaiveDate) -> RepoResult<String> {
    let current_max: Option<i32> = sqlx::query_scalar(
        "SELECT MAX(CAST(SPLIT_PART(booking_id, '-', 2) AS INTEGER)) \
         FROM bookings \
         WHERE booking_id LIKE $1 AND SPLIT_PART(booking_id, '-', 2) ~ '^[0-9]+$'",
    )
    .bind(format!("{}%", year_prefix(today)))
    .fetch_one(pool)
    .await?;

    Ok(format_booking_id(today, next_sequence(current_max)))
}

// =============================================================================
// Parent row
// =============================================================================

const INSERT_BOOKING_FULL: &str = "INSERT INTO bookings \
    (booking_id, first_name, last_name, email, phone, booking_type, status, \
     check_in, check_out, num_guests, hotel_id, package_id, notes, package_only_id) \
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
    RETURNING *";

const INSERT_BOOKING_REDUCED: &str = "INSERT INTO bookings \
    (booking_id, first_name, last_name, email, phone, booking_type, status, \
     check_in, check_out, num_guests, hotel_id, package_id, notes) \
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
    RETURNING *";

const UPDATE_BOOKING_FULL: &str = "UPDATE bookings SET \
    first_name = $2, last_name = $3, email = $4, phone = $5, booking_type = $6, \
    status = $7, check_in = $8, check_out = $9, num_guests = $10, hotel_id = $11, \
    package_id = $12, notes = $13, package_only_id = $14, updated_at = now() \
    WHERE booking_id = $1 \
    RETURNING *";

const UPDATE_BOOKING_REDUCED: &str = "UPDATE bookings SET \
    first_name = $2, last_name = $3, email = $4, phone = $5, booking_type = $6, \
    status = $7, check_in = $8, check_out = $9, num_guests = $10, hotel_id = $11, \
    package_id = $12, notes = $13, updated_at = now() \
    WHERE booking_id = $1 \
    RETURNING *";

/// Bind the shared parent-row parameters ($1..$13) in declaration order
macro_rules! bind_booking_fields {
    ($sql:expr, $booking_id:expr, $data:expr, $booking_type:expr, $status:expr) => {
        sqlx::query_as::<_, Booking>($sql)
            .bind($booking_id)
            .bind($data.first_name.trim())
            .bind($data.last_name.trim())
            .bind(&$data.email)
            .bind(&$data.phone)
            .bind($booking_type)
            .bind($status)
            .bind($data.check_in)
            .bind($data.check_out)
            .bind($data.num_guests)
            .bind($data.hotel_id)
            .bind($data.package_id)
            .bind(&$data.notes)
    };
}

/// Insert the parent booking row
///
/// Includes `package_only_id` while the column is believed present; on the
/// first missing-column failure the flag is cleared and the insert retried
/// with the reduced column set.
pub async fn create(
    pool: &PgPool,
    flags: &SchemaFlags,
    booking_id: &str,
    data: &BookingWrite,
    booking_type: &str,
    status: &str,
) -> RepoResult<Booking> {
    if flags.supports_package_only_id() {
        let result = bind_booking_fields!(INSERT_BOOKING_FULL, booking_id, data, booking_type, status)
            .bind(data.package_only_id)
            .fetch_one(pool)
            .await;

        match result {
            Ok(booking) => return Ok(booking),
            Err(e) if is_undefined_column(&e, "package_only_id") => {
                tracing::warn!(
                    booking_id = %booking_id,
                    "bookings.package_only_id column missing, retrying with reduced column set"
                );
                flags.mark_package_only_id_missing();
            }
            Err(e) => return Err(e.into()),
        }
    } else if data.package_only_id.is_some() {
        tracing::warn!(
            booking_id = %booking_id,
            "package_only_id submitted but column unsupported by schema, dropping"
        );
    }

    let booking =
        bind_booking_fields!(INSERT_BOOKING_REDUCED, booking_id, data, booking_type, status)
            .fetch_one(pool)
            .await?;
    Ok(booking)
}

/// Update the parent booking row, same drift handling as [`create`]
pub async fn update(
    pool: &PgPool,
    flags: &SchemaFlags,
    booking_id: &str,
    data: &BookingWrite,
    booking_type: &str,
    status: &str,
) -> RepoResult<Option<Booking>> {
    if flags.supports_package_only_id() {
        let result = bind_booking_fields!(UPDATE_BOOKING_FULL, booking_id, data, booking_type, status)
            .bind(data.package_only_id)
            .fetch_optional(pool)
            .await;

        match result {
            Ok(booking) => return Ok(booking),
            Err(e) if is_undefined_column(&e, "package_only_id") => {
                tracing::warn!(
                    booking_id = %booking_id,
                    "bookings.package_only_id column missing, retrying with reduced column set"
                );
                flags.mark_package_only_id_missing();
            }
            Err(e) => return Err(e.into()),
        }
    } else if data.package_only_id.is_some() {
        tracing::warn!(
            booking_id = %booking_id,
            "package_only_id submitted but column unsupported by schema, dropping"
        );
    }

    let booking =
        bind_booking_fields!(UPDATE_BOOKING_REDUCED, booking_id, data, booking_type, status)
            .fetch_optional(pool)
            .await?;
    Ok(booking)
}

/// Update only the booking status
pub async fn update_status(
    pool: &PgPool,
    booking_id: &str,
    status: &str,
) -> RepoResult<Option<Booking>> {
    let booking = sqlx::query_as::<_, Booking>(
        "UPDATE bookings SET status = $2, updated_at = now() \
         WHERE booking_id = $1 RETURNING *",
    )
    .bind(booking_id)
    .bind(status)
    .fetch_optional(pool)
    .await?;
    Ok(booking)
}

pub async fn find_by_id(pool: &PgPool, booking_id: &str) -> RepoResult<Option<Booking>> {
    let booking = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE booking_id = $1")
        .bind(booking_id)
        .fetch_optional(pool)
        .await?;
    Ok(booking)
}

/// List bookings, newest first, optionally filtered by status
pub async fn list(
    pool: &PgPool,
    status: Option<&str>,
    limit: i64,
    offset: i64,
) -> RepoResult<Vec<Booking>> {
    let bookings = match status {
        Some(status) => {
            sqlx::query_as::<_, Booking>(
                "SELECT * FROM bookings WHERE status = $1 \
                 ORDER BY created_at DESC, booking_id DESC LIMIT $2 OFFSET $3",
            )
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Booking>(
                "SELECT * FROM bookings \
                 ORDER BY created_at DESC, booking_id DESC LIMIT $1 OFFSET $2",
            )
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?
        }
    };
    Ok(bookings)
}

/// Hard delete a booking; child rows and payments go with it (FK cascade)
pub async fn delete(pool: &PgPool, booking_id: &str) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM bookings WHERE booking_id = $1")
        .bind(booking_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

// =============================================================================
// Child collections (purge-then-insert replacement)
// =============================================================================

/// Replace all vehicle rentals of a booking with the submitted rows
pub async fn replace_vehicle_bookings(
    pool: &PgPool,
    booking_id: &str,
    items: &[VehicleBookingInput],
) -> RepoResult<()> {
    sqlx::query("DELETE FROM vehicle_bookings WHERE booking_id = $1")
        .bind(booking_id)
        .execute(pool)
        .await?;

    for item in items {
        sqlx::query(
            "INSERT INTO vehicle_bookings (booking_id, vehicle_id, pickup_date, return_date, amount) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(booking_id)
        .bind(item.vehicle_id)
        .bind(item.pickup_date)
        .bind(item.return_date)
        .bind(item.amount.unwrap_or(Decimal::ZERO))
        .execute(pool)
        .await?;
    }
    Ok(())
}

/// Replace all van rentals of a booking with the submitted rows
pub async fn replace_van_rentals(
    pool: &PgPool,
    booking_id: &str,
    items: &[VanRentalInput],
) -> RepoResult<()> {
    sqlx::query("DELETE FROM van_rental_bookings WHERE booking_id = $1")
        .bind(booking_id)
        .execute(pool)
        .await?;

    for item in items {
        sqlx::query(
            "INSERT INTO van_rental_bookings (booking_id, destination_id, travel_date, passengers, amount) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(booking_id)
        .bind(item.destination_id)
        .bind(item.travel_date)
        .bind(item.passengers)
        .bind(item.amount.unwrap_or(Decimal::ZERO))
        .execute(pool)
        .await?;
    }
    Ok(())
}

/// Replace all diving bookings of a booking with the submitted rows
///
/// `diving_type` follows the same missing-column handling as the parent row.
pub async fn replace_diving_bookings(
    pool: &PgPool,
    flags: &SchemaFlags,
    booking_id: &str,
    items: &[DivingBookingInput],
) -> RepoResult<()> {
    sqlx::query("DELETE FROM diving_bookings WHERE booking_id = $1")
        .bind(booking_id)
        .execute(pool)
        .await?;

    for item in items {
        insert_diving_booking(pool, flags, booking_id, item).await?;
    }
    Ok(())
}

async fn insert_diving_booking(
    pool: &PgPool,
    flags: &SchemaFlags,
    booking_id: &str,
    item: &DivingBookingInput,
) -> RepoResult<()> {
    if flags.supports_diving_type() {
        let result = sqlx::query(
            "INSERT INTO diving_bookings (booking_id, diving_id, diving_date, divers, amount, diving_type) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(booking_id)
        .bind(item.diving_id)
        .bind(item.diving_date)
        .bind(item.divers)
        .bind(item.amount.unwrap_or(Decimal::ZERO))
        .bind(&item.diving_type)
        .execute(pool)
        .await;

        match result {
            Ok(_) => return Ok(()),
            Err(e) if is_undefined_column(&e, "diving_type") => {
                tracing::warn!(
                    booking_id = %booking_id,
                    "diving_bookings.diving_type column missing, retrying with reduced column set"
                );
                flags.mark_diving_type_missing();
            }
            Err(e) => return Err(e.into()),
        }
    }

    sqlx::query(
        "INSERT INTO diving_bookings (booking_id, diving_id, diving_date, divers, amount) \
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(booking_id)
    .bind(item.diving_id)
    .bind(item.diving_date)
    .bind(item.divers)
    .bind(item.amount.unwrap_or(Decimal::ZERO))
    .execute(pool)
    .await?;
    Ok(())
}

// =============================================================================
// Child detail reads (batched via ANY, catalog names joined in)
// =============================================================================

/// Vehicle rentals for a set of bookings, vehicle names attached
pub async fn vehicle_details_for(
    pool: &PgPool,
    booking_ids: &[String],
) -> RepoResult<Vec<VehicleBookingDetail>> {
    let rows = sqlx::query_as::<_, VehicleBookingDetail>(
        "SELECT vb.id, vb.booking_id, vb.vehicle_id, v.name AS vehicle_name, \
                vb.pickup_date, vb.return_date, vb.amount \
         FROM vehicle_bookings vb \
         LEFT JOIN vehicles v ON v.id = vb.vehicle_id \
         WHERE vb.booking_id = ANY($1) \
         ORDER BY vb.id",
    )
    .bind(booking_ids)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Van rentals for a set of bookings, destination names attached
pub async fn van_rental_details_for(
    pool: &PgPool,
    booking_ids: &[String],
) -> RepoResult<Vec<VanRentalDetail>> {
    let rows = sqlx::query_as::<_, VanRentalDetail>(
        "SELECT vr.id, vr.booking_id, vr.destination_id, vd.destination, \
                vr.travel_date, vr.passengers, vr.amount \
         FROM van_rental_bookings vr \
         LEFT JOIN van_destinations vd ON vd.id = vr.destination_id \
         WHERE vr.booking_id = ANY($1) \
         ORDER BY vr.id",
    )
    .bind(booking_ids)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

const SELECT_DIVING_FULL: &str = "SELECT db.id, db.booking_id, db.diving_id, \
        ds.name AS service_name, db.diving_date, db.divers, db.diving_type, db.amount \
     FROM diving_bookings db \
     LEFT JOIN diving_services ds ON ds.id = db.diving_id \
     WHERE db.booking_id = ANY($1) \
     ORDER BY db.id";

const SELECT_DIVING_REDUCED: &str = "SELECT db.id, db.booking_id, db.diving_id, \
        ds.name AS service_name, db.diving_date, db.divers, db.amount \
     FROM diving_bookings db \
     LEFT JOIN diving_services ds ON ds.id = db.diving_id \
     WHERE db.booking_id = ANY($1) \
     ORDER BY db.id";

/// Diving bookings for a set of bookings, service names attached
///
/// Falls back to a column set without `diving_type` on old schemas; the rows
/// then decode with `diving_type = None`.
pub async fn diving_details_for(
    pool: &PgPool,
    flags: &SchemaFlags,
    booking_ids: &[String],
) -> RepoResult<Vec<DivingBookingDetail>> {
    if flags.supports_diving_type() {
        let result = sqlx::query_as::<_, DivingBookingDetail>(SELECT_DIVING_FULL)
            .bind(booking_ids)
            .fetch_all(pool)
            .await;

        match result {
            Ok(rows) => return Ok(rows),
            Err(e) if is_undefined_column(&e, "diving_type") => {
                tracing::warn!(
                    "diving_bookings.diving_type column missing, retrying with reduced column set"
                );
                flags.mark_diving_type_missing();
            }
            Err(e) => return Err(e.into()),
        }
    }

    let rows = sqlx::query_as::<_, DivingBookingDetail>(SELECT_DIVING_REDUCED)
        .bind(booking_ids)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_year_prefix() {
        assert_eq!(year_prefix(date(2025, 3, 14)), "25-");
        assert_eq!(year_prefix(date(2009, 1, 1)), "09-");
        assert_eq!(year_prefix(date(2100, 1, 1)), "00-");
    }

    #[test]
    fn test_next_sequence_starts_at_one() {
        // No bookings this year yet → counter restarts
        assert_eq!(next_sequence(None), 1);
    }

    #[test]
    fn test_next_sequence_increments() {
        assert_eq!(next_sequence(Some(41)), 42);
        assert_eq!(next_sequence(Some(9999)), 10000);
    }

    #[test]
    fn test_format_booking_id_zero_pads() {
        assert_eq!(format_booking_id(date(2025, 7, 1), 1), "25-0001");
        assert_eq!(format_booking_id(date(2025, 7, 1), 123), "25-0123");
        // Sequence overflow keeps all digits rather than truncating
        assert_eq!(format_booking_id(date(2025, 7, 1), 10000), "25-10000");
    }

    #[test]
    fn test_booking_id_rolls_over_by_year() {
        // Same sequence, different years → distinct ids
        assert_ne!(
            format_booking_id(date(2025, 12, 31), 1),
            format_booking_id(date(2026, 1, 1), 1)
        );
    }
}
