//! Rejections returned by the store.
//!
//! Each variant carries the message shown to the user. The HTTP-like status
//! codes are kept as metadata so the UI can branch on them the same way it
//! would against a real API.

use shared::ErrorBody;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ValidationError,
    InvalidCredentials,
    NotFound,
    Conflict,
}

impl ErrorKind {
    pub fn status(&self) -> u16 {
        match self {
            ErrorKind::ValidationError => 400,
            ErrorKind::InvalidCredentials => 401,
            ErrorKind::NotFound => 404,
            ErrorKind::Conflict => 409,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    InvalidCredentials(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
}

impl StoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        StoreError::Validation(message.into())
    }

    pub fn invalid_credentials() -> Self {
        StoreError::InvalidCredentials("Invalid username or password".to_string())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        StoreError::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        StoreError::Conflict(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::Validation(_) => ErrorKind::ValidationError,
            StoreError::InvalidCredentials(_) => ErrorKind::InvalidCredentials,
            StoreError::NotFound(_) => ErrorKind::NotFound,
            StoreError::Conflict(_) => ErrorKind::Conflict,
        }
    }

    pub fn status(&self) -> u16 {
        self.kind().status()
    }

    pub fn message(&self) -> &str {
        match self {
            StoreError::Validation(message)
            | StoreError::InvalidCredentials(message)
            | StoreError::NotFound(message)
            | StoreError::Conflict(message) => message,
        }
    }

    /// Body in the shape the screens read their error detail from
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            status: self.status(),
            detail: self.message().to_string(),
        }
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
