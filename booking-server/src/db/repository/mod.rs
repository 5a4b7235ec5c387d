//! Repository Module
//!
//! Query functions over the Postgres pool, one module per table family.

pub mod booking;
pub mod diving_service;
pub mod hotel;
pub mod package;
pub mod payment;
pub mod qr_code;
pub mod tour;
pub mod van_destination;
pub mod vehicle;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("In use: {0}")]
    InUse(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// Schema probe helpers
// =============================================================================

/// Check whether a driver error message reports `column` as missing.
///
/// Postgres wording: `column "diving_type" of relation "diving_bookings" does
/// not exist` (insert) or `column db.diving_type does not exist` (select).
/// Matching on the message keeps the check independent of driver error codes.
pub fn message_reports_missing_column(message: &str, column: &str) -> bool {
    message.contains(column) && message.contains("does not exist")
}

/// Check whether a sqlx error is a missing-column error for `column`
pub fn is_undefined_column(err: &sqlx::Error, column: &str) -> bool {
    message_reports_missing_column(&err.to_string(), column)
}

/// Check whether a sqlx error is a foreign key violation
///
/// Used to translate catalog deletes that are still referenced by bookings
/// into a 409 instead of a 500.
pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err
            .code()
            .map(|code| code == "23503")
            .unwrap_or_else(|| db_err.message().contains("foreign key")),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_insert_wording() {
        let msg = r#"error returned from database: column "package_only_id" of relation "bookings" does not exist"#;
        assert!(message_reports_missing_column(msg, "package_only_id"));
        assert!(!message_reports_missing_column(msg, "diving_type"));
    }

    #[test]
    fn test_missing_column_select_wording() {
        let msg = "error returned from database: column db.diving_type does not exist";
        assert!(message_reports_missing_column(msg, "diving_type"));
    }

    #[test]
    fn test_unrelated_errors_do_not_match() {
        let msg = r#"duplicate key value violates unique constraint "bookings_pkey""#;
        assert!(!message_reports_missing_column(msg, "package_only_id"));

        // Mentions the column but is not a missing-column error
        let msg = r#"null value in column "package_only_id" violates not-null constraint"#;
        assert!(!message_reports_missing_column(msg, "package_only_id"));

        // Missing-column wording for a different relation/column
        let msg = r#"relation "diving_bookings" does not exist"#;
        assert!(!message_reports_missing_column(msg, "diving_type"));
    }
}
