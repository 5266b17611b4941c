//! Error taxonomy for admin account operations.
//!
//! Every variant maps to a fixed status code and a short message. Details of
//! server-side faults are logged here and never reach the response body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

use super::password::HashingError;

/// Body of every error response.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum AdminError {
    #[error("bad request: {0}")]
    BadRequest(&'static str),

    #[error("unauthorized")]
    Unauthorized,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("account disabled")]
    AccountDisabled,

    #[error("email already exists")]
    Conflict,

    #[error("not found")]
    NotFound,

    #[error("hashing failed: {0}")]
    Hashing(#[from] HashingError),

    #[error("store error: {0:#}")]
    Store(anyhow::Error),

    #[error("store call exceeded {0:?}")]
    Timeout(std::time::Duration),
}

impl AdminError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized | Self::InvalidCredentials | Self::AccountDisabled => {
                StatusCode::UNAUTHORIZED
            }
            Self::Conflict => StatusCode::CONFLICT,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Hashing(_) | Self::Store(_) | Self::Timeout(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message returned to the caller.
    #[must_use]
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::BadRequest(message) => *message,
            Self::Unauthorized => "unauthorized",
            Self::InvalidCredentials => "invalid credentials",
            Self::AccountDisabled => "account disabled",
            Self::Conflict => "email already exists",
            Self::NotFound => "not found",
            Self::Hashing(_) => "hashing failed",
            Self::Store(_) | Self::Timeout(_) => "db error",
        }
    }

    #[must_use]
    pub fn is_server_fault(&self) -> bool {
        matches!(self, Self::Hashing(_) | Self::Store(_) | Self::Timeout(_))
    }
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        if self.is_server_fault() {
            error!(error = %self, "admin request failed");
        }

        let body = ErrorBody {
            error: self.public_message().to_string(),
        };

        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::time::Duration;

    #[test]
    fn status_codes() {
        assert_eq!(
            AdminError::BadRequest("invalid json").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AdminError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AdminError::InvalidCredentials.status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AdminError::AccountDisabled.status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AdminError::Conflict.status(), StatusCode::CONFLICT);
        assert_eq!(AdminError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AdminError::Store(anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AdminError::Timeout(Duration::from_secs(5)).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn store_details_stay_internal() {
        let err = AdminError::Store(anyhow!("relation \"private.user_admin\" does not exist"));
        assert_eq!(err.public_message(), "db error");
        assert!(err.to_string().contains("private.user_admin"));
    }

    #[test]
    fn bad_request_exposes_validation_message() {
        let err = AdminError::BadRequest("email and password are required");
        assert_eq!(err.public_message(), "email and password are required");
        assert!(!err.is_server_fault());
    }

    #[test]
    fn response_carries_status() {
        let response = AdminError::Conflict.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = AdminError::InvalidCredentials.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
