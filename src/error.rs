use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::views;

#[derive(Error, Debug)]
pub enum AgriError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl AgriError {
    /// True when the failing statement hit a UNIQUE constraint.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            AgriError::Database(sqlx::Error::Database(e)) => e.is_unique_violation(),
            _ => false,
        }
    }
}

pub type AgriResult<T> = Result<T, AgriError>;

impl IntoResponse for AgriError {
    fn into_response(self) -> Response {
        let message = match self {
            AgriError::Validation(ref msg) => {
                return (StatusCode::BAD_REQUEST, views::error_page(msg)).into_response();
            }
            AgriError::Database(ref e) => {
                tracing::error!("Database Error: {:?}", e);
                "The records could not be loaded. Please try again later."
            }
            AgriError::Io(ref e) => {
                tracing::error!("IO Error: {:?}", e);
                "A file system error occurred."
            }
            _ => {
                tracing::error!("Unhandled Error: {:?}", self);
                "An unexpected error occurred."
            }
        };

        (StatusCode::INTERNAL_SERVER_ERROR, views::error_page(message)).into_response()
    }
}
