use axum::{http::StatusCode, response::IntoResponse, Json};
use music_db::DbError;
use serde::Serialize;

/// Message returned for every 5xx; the cause is only logged.
const INTERNAL_MESSAGE: &str = "error processing request";

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Upstream(String),
    Database(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    message: String,
    code: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message, code) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, "BAD_REQUEST"),
            AppError::Upstream(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_MESSAGE.to_string(),
                "UPSTREAM_ERROR",
            ),
            AppError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_MESSAGE.to_string(),
                "DATABASE_ERROR",
            ),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_MESSAGE.to_string(),
                "INTERNAL_ERROR",
            ),
        };
        (
            status,
            Json(ErrorResponse {
                message,
                code: code.to_string(),
            }),
        )
            .into_response()
    }
}

/// Lookup failures are the caller's fault; anything else from storage is a 500.
impl From<DbError> for AppError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound | DbError::OutOfRange { .. } => AppError::BadRequest(e.to_string()),
            _ => AppError::Database(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::BadRequest(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
