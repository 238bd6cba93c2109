use thiserror::Error;

use crate::model::Status;

/// Why a candidate field set was rejected.
///
/// Only the first violation is reported, in field order
/// `titulo`, `autor`, `genero`, `estado`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Field '{0}' must be a non-empty string")]
    EmptyField(&'static str),

    #[error("Invalid status. Allowed values: {}", Status::allowed())]
    InvalidStatus,
}

#[derive(Error, Debug)]
pub enum BiblioError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Could not connect to KeyDB/Redis: {0}")]
    Connection(#[source] redis::RedisError),

    #[error("Store error: {0}")]
    Store(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Book not found: {0}")]
    BookNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BiblioError>;
