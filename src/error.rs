//! Error kinds surfaced by the core operations.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;
use validator::ValidationErrors;

use crate::models::ErrorResponse;
use crate::services::StoreError;

/// Errors returned by the like, match and recommendation operations
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage failure: {0}")]
    Internal(#[from] StoreError),
}

impl From<ValidationErrors> for MatchError {
    fn from(errors: ValidationErrors) -> Self {
        MatchError::InvalidInput(errors.to_string())
    }
}

impl MatchError {
    fn kind(&self) -> &'static str {
        match self {
            MatchError::InvalidInput(_) => "invalid_input",
            MatchError::NotFound(_) => "not_found",
            MatchError::Internal(_) => "internal",
        }
    }

    /// Message safe to hand back to the caller; storage details stay in the logs
    pub fn public_message(&self) -> String {
        match self {
            MatchError::InvalidInput(msg) | MatchError::NotFound(msg) => msg.clone(),
            MatchError::Internal(_) => "Internal server error".to_string(),
        }
    }
}

impl ResponseError for MatchError {
    fn status_code(&self) -> StatusCode {
        match self {
            MatchError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            MatchError::NotFound(_) => StatusCode::NOT_FOUND,
            MatchError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let MatchError::Internal(source) = self {
            tracing::error!("Request failed on storage: {}", source);
        }

        let status = self.status_code();
        HttpResponse::build(status).json(ErrorResponse {
            error: self.kind().to_string(),
            message: self.public_message(),
            status_code: status.as_u16(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(MatchError::InvalidInput("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(MatchError::NotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
        let internal = MatchError::Internal(StoreError::Constraint("boom".into()));
        assert_eq!(internal.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_internal_message_is_generic() {
        let internal = MatchError::Internal(StoreError::Constraint("relation users missing".into()));
        assert_eq!(internal.public_message(), "Internal server error");
    }
}
