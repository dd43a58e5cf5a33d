//! Custom error types for the common library
//!
//! This module defines the database error type shared by every service in the
//! workspace, along with the classification of constraint violations.

use sqlx::Error as SqlxError;
use thiserror::Error;

/// Custom error type for database operations
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error occurred during database connection
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// Error occurred during database query execution
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// Error occurred during database migration
    #[error("Database migration error: {0}")]
    Migration(String),

    /// Configuration error
    #[error("Database configuration error: {0}")]
    Configuration(String),

    /// A unique constraint rejected the write
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    /// A foreign key constraint rejected the write
    #[error("Foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),

    /// A numeric value does not fit its column
    #[error("Value out of range: {0}")]
    OutOfRange(String),
}

/// SQLSTATE raised when arithmetic overflows the column type
const NUMERIC_VALUE_OUT_OF_RANGE: &str = "22003";

impl DatabaseError {
    /// Classify a query error, pulling constraint violations out of the
    /// generic query bucket so callers can map them to client errors.
    pub fn from_query(err: SqlxError) -> Self {
        if let Some(db_err) = err.as_database_error() {
            let constraint = db_err.constraint().unwrap_or("unknown").to_string();
            if db_err.is_unique_violation() {
                return DatabaseError::UniqueViolation(constraint);
            }
            if db_err.is_foreign_key_violation() {
                return DatabaseError::ForeignKeyViolation(constraint);
            }
            if db_err.code().as_deref() == Some(NUMERIC_VALUE_OUT_OF_RANGE) {
                return DatabaseError::OutOfRange(db_err.message().to_string());
            }
        }
        DatabaseError::Query(err)
    }
}

impl From<SqlxError> for DatabaseError {
    fn from(err: SqlxError) -> Self {
        DatabaseError::from_query(err)
    }
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_errors_stay_query_errors() {
        let err = DatabaseError::from_query(SqlxError::RowNotFound);
        assert!(matches!(err, DatabaseError::Query(SqlxError::RowNotFound)));
    }

    #[test]
    fn test_error_messages() {
        let err = DatabaseError::UniqueViolation("products_name_key".to_string());
        assert_eq!(
            err.to_string(),
            "Unique constraint violated: products_name_key"
        );

        let err = DatabaseError::Migration("checksum mismatch".to_string());
        assert_eq!(err.to_string(), "Database migration error: checksum mismatch");

        let err = DatabaseError::OutOfRange("integer out of range".to_string());
        assert_eq!(err.to_string(), "Value out of range: integer out of range");
    }
}
