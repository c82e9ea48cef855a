use models::validation::FieldErrors;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Errors produced by the service layer
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("database error: {0}")]
    Db(DbErr),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("validation failed")]
    Validation(FieldErrors),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<DbErr> for ServiceError {
    fn from(err: DbErr) -> Self {
        // A unique index can still fire when two requests race past the existence checks
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                ServiceError::Conflict(format!("resource already exists ({detail})"))
            }
            _ => ServiceError::Db(err),
        }
    }
}

impl From<FieldErrors> for ServiceError {
    fn from(errors: FieldErrors) -> Self {
        ServiceError::Validation(errors)
    }
}
