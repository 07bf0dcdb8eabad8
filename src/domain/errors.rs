//! Domain error types
//!
//! These errors are framework-agnostic. Handlers decide which HTTP status
//! each one maps to, since the same failure is a 400 on create and a 500 on
//! read or delete.

use std::fmt;

#[derive(Debug)]
pub enum DomainError {
    /// Resource not found
    NotFound,
    /// Input rejected before touching the store
    Validation(String),
    /// Database/persistence error
    Database(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::NotFound => write!(f, "Not found"),
            DomainError::Validation(msg) => write!(f, "Validation error: {}", msg),
            DomainError::Database(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

// Conversion from SeaORM errors (used in infrastructure layer)
impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::Database(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(DomainError::NotFound.to_string(), "Not found");
        assert_eq!(
            DomainError::Validation("supplier must not be blank".into()).to_string(),
            "Validation error: supplier must not be blank"
        );
    }

    #[test]
    fn test_from_db_err() {
        let err: DomainError = sea_orm::DbErr::Custom("connection reset".into()).into();
        match err {
            DomainError::Database(msg) => assert!(msg.contains("connection reset")),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
