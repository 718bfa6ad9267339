use rocket::http::Status;
use rocket::response::Responder;
use rocket::serde::json::Json;
use shared::{Error, ErrorCode, ValidationError};
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Resource not found")]
    NotFound,
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("Possible profanity detected in {0}")]
    Inappropriate(&'static str),
    #[error("A member with this email already exists")]
    DuplicateEmail,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("{0}")]
    RateLimited(String),
    #[error("An internal server error occurred")]
    Internal(String),
}

impl ApiError {
    fn status_and_code(&self) -> (Status, ErrorCode) {
        match self {
            ApiError::NotFound => (Status::NotFound, ErrorCode::NotFound),
            ApiError::Validation(_) => (Status::BadRequest, ErrorCode::ValidationFailed),
            ApiError::Inappropriate(_) => (Status::BadRequest, ErrorCode::InvalidInput),
            ApiError::DuplicateEmail => (Status::Conflict, ErrorCode::Conflict),
            ApiError::InvalidCredentials => (Status::Unauthorized, ErrorCode::Unauthorized),
            ApiError::RateLimited(_) => (Status::TooManyRequests, ErrorCode::RateLimited),
            ApiError::Internal(_) => (Status::InternalServerError, ErrorCode::SystemError),
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for ApiError {
    fn respond_to(self, req: &'r rocket::Request<'_>) -> rocket::response::Result<'o> {
        if let ApiError::Internal(detail) = &self {
            error!(path = %req.uri(), %detail, "Request failed");
        }
        let (status, code) = self.status_and_code();
        let body = match &self {
            ApiError::Inappropriate(field) => Error::with_details(code, self.to_string(), *field),
            _ => Error::new(code, self.to_string()),
        };

        rocket::Response::build_from(Json(body).respond_to(req)?)
            .status(status)
            .ok()
    }
}
