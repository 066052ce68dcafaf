//! Request-level error taxonomy.
//!
//! Handlers return these instead of panicking: persistence and file I/O
//! failures become explicit 500 responses with the detail kept in the log,
//! bad input and unknown records map to 400 and 404.

use actix_web::{HttpResponse, ResponseError};
use log::error;

/// Errors surfaced by the HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A required form field is missing or the payload is malformed.
    #[error("invalid request: {0}")]
    Validation(String),

    /// No record matches the given identifier or key.
    #[error("{0}")]
    NotFound(String),

    /// The dossier database rejected an operation.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The submission store, the upload directory or document output failed.
    #[error("storage error: {0}")]
    Storage(String),
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Validation(_) => {
                HttpResponse::BadRequest().json(serde_json::json!({ "error": self.to_string() }))
            }
            AppError::NotFound(_) => {
                HttpResponse::NotFound().json(serde_json::json!({ "error": self.to_string() }))
            }
            AppError::Database(e) => {
                error!("database error: {}", e);
                HttpResponse::InternalServerError()
                    .json(serde_json::json!({ "error": "internal database error" }))
            }
            AppError::Storage(detail) => {
                error!("storage error: {}", detail);
                HttpResponse::InternalServerError()
                    .json(serde_json::json!({ "error": "internal storage error" }))
            }
        }
    }
}
