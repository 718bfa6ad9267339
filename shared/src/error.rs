use serde::{Serialize, Deserialize};
use std::fmt;
use thiserror::Error;
use crate::models::PhotoId;
use crate::validation::ValidationError;

#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum ErrorCode {
    #[error("Invalid input provided")]
    InvalidInput,
    #[error("Resource not found")]
    NotFound,
    #[error("Operation not authorized")]
    Unauthorized,
    #[error("Operation not allowed")]
    Forbidden,
    #[error("Resource conflict")]
    Conflict,
    #[error("Internal system error")]
    SystemError,
    #[error("Validation failed")]
    ValidationFailed,
    #[error("Rate limit exceeded")]
    RateLimited,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(details) = &self.details {
            write!(f, "{}: {} ({})", self.code, self.message, details)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(code: ErrorCode, message: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: Some(details.into()),
        }
    }
}

/// Failures of the durable key-value collaborator backing the vote store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")] Unavailable(String),
    #[error("Storage write rejected: {0}")] WriteRejected(String),
    #[error("Failed to encode vote record: {0}")] Encode(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VoteError {
    #[error("Sign in to vote")] NotAuthenticated,
    #[error("Unknown photo: {0}")] UnknownPhoto(PhotoId),
    #[error("You cannot vote for your own photo {0}")] SelfVoteRejected(PhotoId),
    #[error("Votes could not be saved: {0}")] PersistenceWriteFailure(StorageError),
}

impl VoteError {
    pub fn code(&self) -> ErrorCode {
        match self {
            VoteError::NotAuthenticated => ErrorCode::Unauthorized,
            VoteError::UnknownPhoto(_) => ErrorCode::NotFound,
            VoteError::SelfVoteRejected(_) => ErrorCode::Forbidden,
            VoteError::PersistenceWriteFailure(_) => ErrorCode::SystemError,
        }
    }
}

impl From<VoteError> for Error {
    fn from(e: VoteError) -> Self {
        Error::new(e.code(), e.to_string())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Duplicate photo id: {0}")] DuplicatePhoto(PhotoId),
    #[error("Vote count of photo {0} does not match its voters")] InconsistentVotes(PhotoId),
    #[error("Photo {0} lists its own photographer as a voter")] SelfVote(PhotoId),
    #[error("Invalid photo {0}: {1}")] InvalidPhoto(PhotoId, ValidationError),
}
