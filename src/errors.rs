use crate::helpers::JsonResponse;
use actix_web::{http::StatusCode, HttpResponse, ResponseError};

/// Failures surfaced by the store and the service.
#[derive(Debug, thiserror::Error)]
pub enum FeedbackError {
    /// Store unreachable or rejected the operation.
    #[error("persistence error: {0}")]
    Persistence(String),
    /// Update target does not exist.
    #[error("not found: {0}")]
    NotFound(String),
    /// Malformed request input.
    #[error("validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for FeedbackError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::NotFound("record not found".to_string()),
            err => Self::Persistence(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for FeedbackError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        Self::Persistence(format!("migration failed: {}", err))
    }
}

impl ResponseError for FeedbackError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            Self::Persistence(_) => JsonResponse::internal_server_error("Server error"),
            Self::NotFound(msg) => JsonResponse::not_found(msg),
            Self::Validation(msg) => JsonResponse::bad_request(msg),
        };

        body.respond()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        let err: FeedbackError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, FeedbackError::NotFound(_)));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn status_codes() {
        assert_eq!(
            FeedbackError::Persistence("down".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            FeedbackError::Validation("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }
}
