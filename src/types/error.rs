use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    // standard web stuffs
    #[error("already exists")]
    AlreadyExists,
    #[error("not found")]
    NotFound,
    #[error("validation error: {0}")]
    Validation(String),
    #[error("unauthorized")]
    Unauthorized,

    // infra things
    #[error(transparent)]
    Db(DbErr),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<DbErr> for AppError {
    fn from(e: DbErr) -> Self {
        AppError::from_db(e)
    }
}

#[derive(Serialize)]
struct ErrorBody<'a, 'b> {
    error: &'a str,
    message: &'b str,
}

impl AppError {
    fn kind(&self) -> &'static str {
        match self {
            Self::AlreadyExists => "ALREADY_EXISTS",
            Self::NotFound => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Db(_) => "INTERNAL_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    // What the client sees. Store and internal failures are logged with
    // detail server-side; the body stays generic. Unauthorized and NotFound
    // intentionally collapse their causes (no username/token oracle).
    fn client_message(&self) -> String {
        match self {
            Self::AlreadyExists => "username already exists".to_string(),
            Self::NotFound => "not found".to_string(),
            Self::Validation(msg) => msg.clone(),
            Self::Unauthorized => "invalid credentials or token".to_string(),
            Self::Db(_) | Self::Internal(_) => "internal server error".to_string(),
        }
    }

    fn from_db(err: DbErr) -> Self {
        // racing inserts can slip past an existence pre-check; the unique
        // constraint is the authority and its violation is a conflict
        if let Some(SqlErr::UniqueConstraintViolation(_)) = err.sql_err() {
            return AppError::AlreadyExists;
        }
        match &err {
            DbErr::RecordNotFound(_) => AppError::NotFound,
            _ => AppError::Db(err),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::AlreadyExists => StatusCode::CONFLICT,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Db(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let Self::Db(_) | Self::Internal(_) = self {
            log::error!("request failed: {}", self);
        }
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.kind(),
            message: &self.client_message(),
        })
    }
}
