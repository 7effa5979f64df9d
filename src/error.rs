//!
//! # Error Handling
//!
//! This module defines `AppError`, the error type shared by the token verifier,
//! the todo store and the request handlers.
//!
//! `AppError` implements `actix_web::error::ResponseError`, which is the only place
//! errors become HTTP status codes. `From` implementations for `sqlx::Error`,
//! `validator::ValidationErrors` and `jsonwebtoken::errors::Error` let the `?`
//! operator do the conversion.

use actix_web::{
    error::{JsonPayloadError, PathError, ResponseError},
    http::{header, StatusCode},
    HttpRequest, HttpResponse,
};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// The caller could not be authenticated (HTTP 401).
    /// Responses carry a `WWW-Authenticate: Bearer` challenge.
    Unauthorized(String),
    /// The todo does not exist or belongs to someone else (HTTP 404).
    /// Both cases share one message so existence never leaks.
    NotFound(String),
    /// The request body failed deserialization or validation (HTTP 422).
    ValidationError(String),
    /// A database operation failed (HTTP 500).
    /// The detail is logged; the client only sees a generic message.
    DatabaseError(String),
    /// Any other server-side failure (HTTP 500).
    InternalServerError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Unauthorized(msg) => HttpResponse::Unauthorized()
                .insert_header((header::WWW_AUTHENTICATE, "Bearer"))
                .json(json!({ "error": msg })),
            AppError::NotFound(msg) => HttpResponse::NotFound().json(json!({ "error": msg })),
            AppError::ValidationError(msg) => {
                HttpResponse::UnprocessableEntity().json(json!({ "error": msg }))
            }
            // Storage details stay in the server log.
            AppError::DatabaseError(_) => HttpResponse::InternalServerError().json(json!({
                "error": "Internal server error"
            })),
            AppError::InternalServerError(msg) => {
                HttpResponse::InternalServerError().json(json!({ "error": msg }))
            }
        }
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// `RowNotFound` becomes the generic todo not-found error; everything else is
/// logged and surfaced as a `DatabaseError`.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Todo not found".into()),
            _ => {
                log::error!("database operation failed: {}", error);
                AppError::DatabaseError(error.to_string())
            }
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

/// Converts `jsonwebtoken::errors::Error` into `AppError::Unauthorized`.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::Unauthorized(format!("Invalid authentication credentials: {}", error))
    }
}

/// Error handler for `web::JsonConfig`, so malformed bodies are rejected with
/// 422 like every other validation failure.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::ValidationError(err.to_string()).into()
}

/// Error handler for `web::PathConfig`. An id that does not parse gets the same
/// answer as an id that does not exist.
pub fn path_error_handler(err: PathError, req: &HttpRequest) -> actix_web::Error {
    log::debug!("unparsable path {}: {}", req.path(), err);
    AppError::NotFound("Todo not found".into()).into()
}
