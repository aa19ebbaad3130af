use mongodb::bson;
use serde::Serialize;
use thiserror::Error;

/// Coarse classification used by the routing layer to pick a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    BadInput,
    ServerError,
}

#[derive(Error, Debug, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum AppError {
    #[error("Validation error: {}", .0.join("; "))]
    ValidationError(Vec<String>),

    #[error("Unknown cuisine code: {0}")]
    UnknownCuisineCode(i32),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("No document was changed: {0}")]
    NoChangeApplied(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error(
        "Removed {restaurants_deleted} restaurant document(s) but failed to remove reviews: {reason}"
    )]
    PartialRemoval {
        restaurants_deleted: u64,
        reason: String,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Operation timed out: {0}")]
    Timeout(String),

    #[error("Operation cancelled: {0}")]
    Cancelled(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::ValidationError(_)
            | AppError::UnknownCuisineCode(_)
            | AppError::NoChangeApplied(_)
            | AppError::InvalidInput(_) => ErrorKind::BadInput,
            AppError::DatabaseError(_)
            | AppError::PartialRemoval { .. }
            | AppError::Configuration(_)
            | AppError::Timeout(_)
            | AppError::Cancelled(_)
            | AppError::SerializationError(_) => ErrorKind::ServerError,
        }
    }

    /// Messages to surface verbatim to the caller.
    pub fn messages(&self) -> Vec<String> {
        match self {
            AppError::ValidationError(errors) => errors.clone(),
            other => vec![other.to_string()],
        }
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}

impl From<bson::oid::Error> for AppError {
    fn from(err: bson::oid::Error) -> Self {
        AppError::InvalidInput(format!("Invalid document id: {}", err))
    }
}

impl From<bson::ser::Error> for AppError {
    fn from(err: bson::ser::Error) -> Self {
        AppError::SerializationError(err.to_string())
    }
}

impl From<bson::de::Error> for AppError {
    fn from(err: bson::de::Error) -> Self {
        AppError::SerializationError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::SerializationError(err.to_string())
    }
}

// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
