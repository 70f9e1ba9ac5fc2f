//! Error handling middleware - RFC 7807 compliant responses.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use agora_core::DomainError;
use agora_shared::ErrorResponse;
use std::fmt;

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Unauthorized,
    Conflict(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Unauthorized => write!(f, "Unauthorized"),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::Unauthorized => ErrorResponse::unauthorized(),
            AppError::Conflict(detail) => ErrorResponse::conflict(detail),
            AppError::Internal(detail) => {
                // Details stay in the logs, never in the response body
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        if err.is_not_found() {
            return AppError::NotFound(err.to_string());
        }
        if err.is_conflict() {
            return AppError::Conflict(err.to_string());
        }
        match err {
            DomainError::InvalidCredentials => AppError::Unauthorized,
            DomainError::Validation(msg) => AppError::BadRequest(msg),
            other => AppError::Internal(other.to_string()),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use agora_core::RepoError;
    use uuid::Uuid;

    #[test]
    fn test_post_not_found_is_404() {
        let err = AppError::from(DomainError::PostNotFound {
            post_id: Uuid::new_v4(),
        });
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_wrapped_failures_are_500() {
        let errors = [
            DomainError::GettingPosts {
                cause: RepoError::Query("boom".to_string()),
            },
            DomainError::GettingPost {
                post_id: Uuid::new_v4(),
                cause: RepoError::Query("boom".to_string()),
            },
            DomainError::LikingPost {
                post_id: Uuid::new_v4(),
                liker_id: Uuid::new_v4(),
                cause: RepoError::Query("boom".to_string()),
            },
            DomainError::UpdatingUser {
                user_id: Uuid::new_v4(),
                operation: agora_core::error::UserOperation::Logout,
                cause: RepoError::NotFound,
            },
        ];

        for err in errors {
            assert_eq!(
                AppError::from(err).status_code(),
                StatusCode::INTERNAL_SERVER_ERROR
            );
        }
    }

    #[test]
    fn test_client_errors() {
        assert_eq!(
            AppError::from(DomainError::InvalidCredentials).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::from(DomainError::UsernameTaken {
                username: "ann".to_string()
            })
            .status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::from(DomainError::UserExists {
                username: "bob".to_string(),
                cause: RepoError::Constraint("email 'ann@example.com' already exists".to_string()),
            })
            .status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::from(DomainError::Validation("bad".to_string())).status_code(),
            StatusCode::BAD_REQUEST
        );
    }
}
