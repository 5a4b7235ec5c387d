//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! Postgres TEXT has no built-in length enforcement, so limits are
//! applied here before anything reaches the database.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: hotel, vehicle, tour, package, diving service, etc.
pub const MAX_NAME_LEN: usize = 200;

/// Customer names
pub const MAX_CUSTOMER_NAME_LEN: usize = 100;

/// Notes, descriptions, inclusions
pub const MAX_NOTE_LEN: usize = 1000;

/// Short identifiers: phone, plate number, payment method, diving type
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// URLs / image paths
pub const MAX_URL_LEN: usize = 2048;

// ── Validation helpers (CRUD handlers) ──────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Minimal email shape check: `local@domain` with a dot in the domain.
///
/// Deliverability is the SMTP relay's problem; this only rejects obvious typos.
pub fn validate_email(value: &str) -> Result<(), AppError> {
    if value.len() > MAX_EMAIL_LEN {
        return Err(AppError::validation("email is too long"));
    }
    let Some((local, domain)) = value.split_once('@') else {
        return Err(AppError::validation(format!("invalid email: {value}")));
    };
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(AppError::validation(format!("invalid email: {value}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Sea Breeze Inn", "name", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("   ", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text(&"x".repeat(300), "name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn test_optional_text() {
        assert!(validate_optional_text(&None, "notes", MAX_NOTE_LEN).is_ok());
        assert!(validate_optional_text(&Some("ok".into()), "notes", MAX_NOTE_LEN).is_ok());
        assert!(validate_optional_text(&Some("y".repeat(2000)), "notes", MAX_NOTE_LEN).is_err());
    }

    #[test]
    fn test_email_shape() {
        assert!(validate_email("guest@example.com").is_ok());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("guest@localhost").is_err());
    }
}
