//! Booking Model
//!
//! 预订主表 + 子记录 (车辆/面包车/潜水) + 聚合响应结构。
//!
//! `booking_id` 格式为 `YY-NNNN`，按年份单调分配。

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::utils::AppError;
use shared::error::ErrorCode;

use super::{Hotel, Payment};

/// Booking status lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Rescheduled,
    Completed,
}

impl BookingStatus {
    /// Parse a status string, case-insensitive, surrounding whitespace ignored
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "cancelled" => Some(Self::Cancelled),
            "rescheduled" => Some(Self::Rescheduled),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Rescheduled => "rescheduled",
            Self::Completed => "completed",
        }
    }
}

/// Normalize a submitted booking type to its canonical form
///
/// Accepts any casing and `_`/space separators ("Package Only" → "package-only").
/// Returns `None` for unknown types.
pub fn normalize_booking_type(input: &str) -> Option<String> {
    let canonical = input.trim().to_ascii_lowercase().replace([' ', '_'], "-");
    match canonical.as_str() {
        "hotel" | "package" | "package-only" | "custom" => Some(canonical),
        _ => None,
    }
}

/// Booking row
///
/// `package_only_id` 为后加的可选列，旧库可能缺失，
/// 因此解码时允许该列不存在。
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Booking {
    pub booking_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub booking_type: String,
    pub status: String,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub num_guests: Option<i32>,
    pub hotel_id: Option<i64>,
    pub package_id: Option<i64>,
    #[sqlx(default)]
    pub package_only_id: Option<i64>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Submitted vehicle rental line-item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleBookingInput {
    pub vehicle_id: Option<i64>,
    pub pickup_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    #[serde(default)]
    pub amount: Option<Decimal>,
}

/// Submitted van rental line-item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VanRentalInput {
    pub destination_id: Option<i64>,
    pub travel_date: Option<NaiveDate>,
    pub passengers: Option<i32>,
    #[serde(default)]
    pub amount: Option<Decimal>,
}

/// Submitted diving line-item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DivingBookingInput {
    pub diving_id: Option<i64>,
    pub diving_date: Option<NaiveDate>,
    pub divers: Option<i32>,
    pub diving_type: Option<String>,
    #[serde(default)]
    pub amount: Option<Decimal>,
}

/// Booking create/update payload
///
/// 创建和更新共用同一结构；子记录数组为 `None` 时表示不改动该集合，
/// 为 `Some` 时整体替换 (先清后插)。
#[derive(Debug, Clone, Deserialize)]
pub struct BookingWrite {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub booking_type: String,
    pub status: Option<String>,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub num_guests: Option<i32>,
    pub hotel_id: Option<i64>,
    pub package_id: Option<i64>,
    pub package_only_id: Option<i64>,
    pub notes: Option<String>,

    // === 子记录集合 ===
    pub vehicles: Option<Vec<VehicleBookingInput>>,
    pub van_rentals: Option<Vec<VanRentalInput>>,
    pub diving: Option<Vec<DivingBookingInput>>,

    // === 支付字段 ===
    pub total_amount: Option<Decimal>,
    pub amount_paid: Option<Decimal>,
    pub payment_method: Option<String>,
    pub payment_date: Option<NaiveDate>,
}

impl BookingWrite {
    /// Validate required customer/date fields and amount sanity
    pub fn validate(&self) -> Result<(), AppError> {
        if self.first_name.trim().is_empty() {
            return Err(AppError::with_message(
                ErrorCode::RequiredField,
                "first_name is required",
            ));
        }
        if self.last_name.trim().is_empty() {
            return Err(AppError::with_message(
                ErrorCode::RequiredField,
                "last_name is required",
            ));
        }
        if self.check_in.is_none() {
            return Err(AppError::with_message(
                ErrorCode::RequiredField,
                "check_in is required",
            ));
        }
        if let (Some(check_in), Some(check_out)) = (self.check_in, self.check_out)
            && check_out < check_in
        {
            return Err(AppError::with_message(
                ErrorCode::InvalidBookingDates,
                format!("check_out {} is before check_in {}", check_out, check_in),
            ));
        }
        for amount in [self.total_amount, self.amount_paid].into_iter().flatten() {
            if amount < Decimal::ZERO {
                return Err(AppError::with_message(
                    ErrorCode::InvalidPaymentAmount,
                    "amounts must not be negative",
                ));
            }
        }
        Ok(())
    }

    /// Canonical booking type, or an error for unknown types
    pub fn normalized_type(&self) -> Result<String, AppError> {
        normalize_booking_type(&self.booking_type).ok_or_else(|| {
            AppError::with_message(
                ErrorCode::InvalidBookingType,
                format!("Unknown booking type: {}", self.booking_type),
            )
        })
    }

    /// Canonical status; missing status defaults to `pending`
    pub fn normalized_status(&self) -> Result<BookingStatus, AppError> {
        match &self.status {
            None => Ok(BookingStatus::Pending),
            Some(raw) => BookingStatus::parse(raw).ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::InvalidBookingStatus,
                    format!("Unknown booking status: {}", raw),
                )
            }),
        }
    }

    /// Whether the payload carries payment information at all
    ///
    /// 既无总额也无付款日期时，更新会删除该预订的支付记录。
    pub fn has_payment(&self) -> bool {
        self.total_amount.is_some() || self.payment_date.is_some()
    }
}

/// Derived total: the explicit total wins, otherwise the sum of child amounts
pub fn fallback_total(
    explicit: Option<Decimal>,
    child_amounts: impl IntoIterator<Item = Decimal>,
) -> Decimal {
    explicit.unwrap_or_else(|| child_amounts.into_iter().sum())
}

// =============================================================================
// Detail rows (child records joined to their catalog entry)
// =============================================================================

/// Vehicle rental row with the vehicle name attached
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct VehicleBookingDetail {
    pub id: i64,
    pub booking_id: String,
    pub vehicle_id: Option<i64>,
    pub vehicle_name: Option<String>,
    pub pickup_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    pub amount: Decimal,
}

/// Van rental row with the destination name attached
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct VanRentalDetail {
    pub id: i64,
    pub booking_id: String,
    pub destination_id: Option<i64>,
    pub destination: Option<String>,
    pub travel_date: Option<NaiveDate>,
    pub passengers: Option<i32>,
    pub amount: Decimal,
}

/// Diving row with the service name attached
///
/// `diving_type` 可选列缺失时解码为 `None`。
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct DivingBookingDetail {
    pub id: i64,
    pub booking_id: String,
    pub diving_id: Option<i64>,
    pub service_name: Option<String>,
    pub diving_date: Option<NaiveDate>,
    pub divers: Option<i32>,
    #[sqlx(default)]
    pub diving_type: Option<String>,
    pub amount: Decimal,
}

/// Fully composed booking: the parent row merged with every child record
#[derive(Debug, Clone, Serialize)]
pub struct BookingDetails {
    #[serde(flatten)]
    pub booking: Booking,
    pub hotel: Option<Hotel>,
    pub vehicle_bookings: Vec<VehicleBookingDetail>,
    pub van_rentals: Vec<VanRentalDetail>,
    pub diving_bookings: Vec<DivingBookingDetail>,
    pub payment: Option<Payment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str_exact(s).unwrap()
    }

    fn base_write() -> BookingWrite {
        BookingWrite {
            first_name: "Ana".into(),
            last_name: "Reyes".into(),
            email: Some("ana@example.com".into()),
            phone: None,
            booking_type: "Hotel".into(),
            status: None,
            check_in: NaiveDate::from_ymd_opt(2025, 6, 1),
            check_out: NaiveDate::from_ymd_opt(2025, 6, 4),
            num_guests: Some(2),
            hotel_id: Some(1),
            package_id: None,
            package_only_id: None,
            notes: None,
            vehicles: None,
            van_rentals: None,
            diving: None,
            total_amount: None,
            amount_paid: None,
            payment_method: None,
            payment_date: None,
        }
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(BookingStatus::parse("pending"), Some(BookingStatus::Pending));
        assert_eq!(
            BookingStatus::parse("  Confirmed "),
            Some(BookingStatus::Confirmed)
        );
        assert_eq!(
            BookingStatus::parse("RESCHEDULED"),
            Some(BookingStatus::Rescheduled)
        );
        assert_eq!(BookingStatus::parse("paid"), None);
        assert_eq!(BookingStatus::parse(""), None);
    }

    #[test]
    fn test_normalize_booking_type() {
        assert_eq!(normalize_booking_type("hotel").as_deref(), Some("hotel"));
        assert_eq!(
            normalize_booking_type("Package Only").as_deref(),
            Some("package-only")
        );
        assert_eq!(
            normalize_booking_type("PACKAGE_ONLY").as_deref(),
            Some("package-only")
        );
        assert_eq!(normalize_booking_type("cruise"), None);
    }

    #[test]
    fn test_validate_requires_names_and_check_in() {
        let mut w = base_write();
        w.first_name = "  ".into();
        assert!(w.validate().is_err());

        let mut w = base_write();
        w.check_in = None;
        assert!(w.validate().is_err());

        assert!(base_write().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_reversed_dates() {
        let mut w = base_write();
        w.check_out = NaiveDate::from_ymd_opt(2025, 5, 30);
        let err = w.validate().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidBookingDates);
    }

    #[test]
    fn test_validate_rejects_negative_amounts() {
        let mut w = base_write();
        w.total_amount = Some(dec("-1.00"));
        let err = w.validate().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidPaymentAmount);
    }

    #[test]
    fn test_normalized_status_defaults_to_pending() {
        let w = base_write();
        assert_eq!(w.normalized_status().unwrap(), BookingStatus::Pending);

        let mut w = base_write();
        w.status = Some("completed".into());
        assert_eq!(w.normalized_status().unwrap(), BookingStatus::Completed);

        let mut w = base_write();
        w.status = Some("archived".into());
        assert_eq!(
            w.normalized_status().unwrap_err().code,
            ErrorCode::InvalidBookingStatus
        );
    }

    #[test]
    fn test_fallback_total_prefers_explicit() {
        let total = fallback_total(Some(dec("999.00")), vec![dec("100.00"), dec("50.00")]);
        assert_eq!(total, dec("999.00"));
    }

    #[test]
    fn test_fallback_total_sums_children() {
        let total = fallback_total(None, vec![dec("1500.00"), dec("800.50"), dec("200.00")]);
        assert_eq!(total, dec("2500.50"));

        let empty = fallback_total(None, Vec::<Decimal>::new());
        assert_eq!(empty, Decimal::ZERO);
    }

    #[test]
    fn test_details_serialize_flattened() {
        let booking = Booking {
            booking_id: "25-0007".into(),
            first_name: "Ana".into(),
            last_name: "Reyes".into(),
            email: None,
            phone: None,
            booking_type: "hotel".into(),
            status: "pending".into(),
            check_in: NaiveDate::from_ymd_opt(2025, 6, 1),
            check_out: None,
            num_guests: None,
            hotel_id: None,
            package_id: None,
            package_only_id: None,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let details = BookingDetails {
            booking,
            hotel: None,
            vehicle_bookings: Vec::new(),
            van_rentals: Vec::new(),
            diving_bookings: Vec::new(),
            payment: None,
        };

        let value = serde_json::to_value(&details).unwrap();
        // Parent fields are flattened next to the child collections
        assert_eq!(value["booking_id"], "25-0007");
        assert_eq!(value["status"], "pending");
        assert!(value["vehicle_bookings"].as_array().unwrap().is_empty());
        assert!(value["diving_bookings"].as_array().unwrap().is_empty());
        assert!(value["payment"].is_null());
    }

    #[test]
    fn test_has_payment() {
        assert!(!base_write().has_payment());

        let mut w = base_write();
        w.total_amount = Some(dec("100.00"));
        assert!(w.has_payment());

        let mut w = base_write();
        w.payment_date = NaiveDate::from_ymd_opt(2025, 6, 1);
        assert!(w.has_payment());
    }
}
