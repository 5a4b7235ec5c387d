//! Unified error codes for the booking backend
//!
//! Error codes are shared between the server and the admin frontend.
//! They are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Booking errors
//! - 2xxx: Payment errors
//! - 3xxx: Catalog errors
//! - 4xxx: Email errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Booking ====================
    /// Booking not found
    BookingNotFound = 1001,
    /// Failed to allocate a booking id
    BookingIdAllocationFailed = 1002,
    /// Booking status is not one of the known statuses
    InvalidBookingStatus = 1003,
    /// Booking type is not one of the known types
    InvalidBookingType = 1004,
    /// Stay dates are missing or inconsistent
    InvalidBookingDates = 1005,

    // ==================== 2xxx: Payment ====================
    /// Payment not found
    PaymentNotFound = 2001,
    /// Payment amount is negative or otherwise invalid
    InvalidPaymentAmount = 2002,

    // ==================== 3xxx: Catalog ====================
    /// Vehicle not found
    VehicleNotFound = 3001,
    /// Hotel not found
    HotelNotFound = 3002,
    /// Diving service not found
    DivingServiceNotFound = 3003,
    /// Van destination not found
    VanDestinationNotFound = 3004,
    /// Tour not found
    TourNotFound = 3005,
    /// Package not found
    PackageNotFound = 3006,
    /// QR code not found
    QrCodeNotFound = 3007,
    /// A catalog entry with the same name already exists
    CatalogNameExists = 3008,
    /// Catalog entry is referenced by bookings and cannot be deleted
    CatalogInUse = 3009,

    // ==================== 4xxx: Email ====================
    /// SMTP is not configured
    EmailNotConfigured = 4001,
    /// Sending the email failed after retries
    EmailSendFailed = 4002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9003,
    /// Network error (transient)
    NetworkError = 9004,
    /// Timeout error (transient)
    TimeoutError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default human-readable message for this error code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "OK",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",
            Self::InvalidFormat => "Invalid format",
            Self::RequiredField => "Required field missing",
            Self::ValueOutOfRange => "Value out of range",

            Self::BookingNotFound => "Booking not found",
            Self::BookingIdAllocationFailed => "Failed to allocate booking id",
            Self::InvalidBookingStatus => "Invalid booking status",
            Self::InvalidBookingType => "Invalid booking type",
            Self::InvalidBookingDates => "Invalid booking dates",

            Self::PaymentNotFound => "Payment not found",
            Self::InvalidPaymentAmount => "Invalid payment amount",

            Self::VehicleNotFound => "Vehicle not found",
            Self::HotelNotFound => "Hotel not found",
            Self::DivingServiceNotFound => "Diving service not found",
            Self::VanDestinationNotFound => "Van destination not found",
            Self::TourNotFound => "Tour not found",
            Self::PackageNotFound => "Package not found",
            Self::QrCodeNotFound => "QR code not found",
            Self::CatalogNameExists => "An entry with this name already exists",
            Self::CatalogInUse => "Entry is referenced by existing bookings",

            Self::EmailNotConfigured => "Email is not configured",
            Self::EmailSendFailed => "Failed to send email",

            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
            Self::ConfigError => "Configuration error",
            Self::NetworkError => "Network error",
            Self::TimeoutError => "Operation timed out",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 value into [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => Self::Success,
            1 => Self::Unknown,
            2 => Self::ValidationFailed,
            3 => Self::NotFound,
            4 => Self::AlreadyExists,
            5 => Self::InvalidRequest,
            6 => Self::InvalidFormat,
            7 => Self::RequiredField,
            8 => Self::ValueOutOfRange,

            1001 => Self::BookingNotFound,
            1002 => Self::BookingIdAllocationFailed,
            1003 => Self::InvalidBookingStatus,
            1004 => Self::InvalidBookingType,
            1005 => Self::InvalidBookingDates,

            2001 => Self::PaymentNotFound,
            2002 => Self::InvalidPaymentAmount,

            3001 => Self::VehicleNotFound,
            3002 => Self::HotelNotFound,
            3003 => Self::DivingServiceNotFound,
            3004 => Self::VanDestinationNotFound,
            3005 => Self::TourNotFound,
            3006 => Self::PackageNotFound,
            3007 => Self::QrCodeNotFound,
            3008 => Self::CatalogNameExists,
            3009 => Self::CatalogInUse,

            4001 => Self::EmailNotConfigured,
            4002 => Self::EmailSendFailed,

            9001 => Self::InternalError,
            9002 => Self::DatabaseError,
            9003 => Self::ConfigError,
            9004 => Self::NetworkError,
            9005 => Self::TimeoutError,

            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip() {
        for code in [
            ErrorCode::Success,
            ErrorCode::ValidationFailed,
            ErrorCode::BookingNotFound,
            ErrorCode::PaymentNotFound,
            ErrorCode::VehicleNotFound,
            ErrorCode::EmailSendFailed,
            ErrorCode::DatabaseError,
        ] {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_invalid_code() {
        assert_eq!(ErrorCode::try_from(777), Err(InvalidErrorCode(777)));
        assert_eq!(ErrorCode::try_from(65535), Err(InvalidErrorCode(65535)));
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&ErrorCode::BookingNotFound).unwrap();
        assert_eq!(json, "1001");

        let code: ErrorCode = serde_json::from_str("9002").unwrap();
        assert_eq!(code, ErrorCode::DatabaseError);
    }

    #[test]
    fn test_default_messages() {
        assert_eq!(ErrorCode::Success.message(), "OK");
        assert_eq!(ErrorCode::BookingNotFound.message(), "Booking not found");
        assert_eq!(ErrorCode::DatabaseError.message(), "Database error");
    }
}
