use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use std::fmt;

use crate::llm::LlmError;
use crate::templates_structs::ApiErrorResponse;

#[derive(Debug)]
pub enum AppError {
    Db(sqlx::Error),
    Migrate(sqlx::migrate::MigrateError),
    /// Missing record; the payload names what was looked up ("Slide", "Presentation").
    NotFound(&'static str),
    InvalidInput(String),
    Generation(String),
    Config(String),
}

impl AppError {
    /// Wrap an LLM failure with the operation that triggered it, e.g.
    /// "Failed to generate layout variants: upstream returned 502".
    pub fn generation(context: &str, err: LlmError) -> Self {
        AppError::Generation(format!("{context}: {err}"))
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Db(e) => write!(f, "Database error: {e}"),
            AppError::Migrate(e) => write!(f, "Migration error: {e}"),
            AppError::NotFound(what) => write!(f, "{what} not found"),
            AppError::InvalidInput(msg) => write!(f, "{msg}"),
            AppError::Generation(msg) => write!(f, "{msg}"),
            AppError::Config(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::NotFound(_) | AppError::InvalidInput(_) => ApiErrorResponse {
                error: self.to_string(),
                details: None,
            },
            AppError::Generation(msg) => {
                log::error!("{msg}");
                ApiErrorResponse {
                    error: "Generation failed".to_string(),
                    details: Some(msg.clone()),
                }
            }
            _ => {
                log::error!("{self}");
                ApiErrorResponse {
                    error: "Internal Server Error".to_string(),
                    details: None,
                }
            }
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Db(e)
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(e: sqlx::migrate::MigrateError) -> Self {
        AppError::Migrate(e)
    }
}
