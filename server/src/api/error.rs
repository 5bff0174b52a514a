//! Mapping of service failures to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use displaydoc::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

use crate::{horizon::LedgerError, store::StoreError};

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub detail: String,
    pub timestamp: DateTime<Utc>,
}

/// Errors a handler can return.
#[derive(Debug, Display, Error)]
pub enum ApiError {
    /// {0}
    BadRequest(String),

    /// {0}
    Unprocessable(String),

    /// Ledger error: {0}
    Ledger(#[from] LedgerError),

    /// Store error: {0}
    Store(#[from] StoreError),
}

impl ApiError {
    fn status_and_detail(&self) -> (StatusCode, String) {
        match self {
            ApiError::BadRequest(detail) => (StatusCode::BAD_REQUEST, detail.clone()),
            ApiError::Unprocessable(detail) => {
                (StatusCode::UNPROCESSABLE_ENTITY, detail.clone())
            }
            ApiError::Ledger(LedgerError::NotFound(account_id)) => (
                StatusCode::NOT_FOUND,
                format!("Account {} not found", account_id),
            ),
            ApiError::Ledger(LedgerError::Unreachable(_)) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Unable to connect to Stellar network".to_string(),
            ),
            ApiError::Ledger(LedgerError::Unexpected(_)) | ApiError::Store(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = self.status_and_detail();

        if status.is_server_error() {
            error!("Request failed: {}", self);
        } else {
            warn!("Request rejected: {}", self);
        }

        let body = ErrorResponse {
            error: status
                .canonical_reason()
                .unwrap_or("Error")
                .to_string(),
            detail,
            timestamp: Utc::now(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let id = "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF"
            .parse()
            .unwrap();

        let cases = [
            (ApiError::BadRequest("bad".into()), StatusCode::BAD_REQUEST),
            (
                ApiError::Unprocessable("bad field".into()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (ApiError::Ledger(LedgerError::NotFound(id)), StatusCode::NOT_FOUND),
            (
                ApiError::Ledger(LedgerError::Unreachable("refused".into())),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                ApiError::Ledger(LedgerError::Unexpected("boom".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (ApiError::Store(StoreError::LockPoisoned), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn test_internal_detail_is_not_echoed() {
        let error = ApiError::Ledger(LedgerError::Unexpected("secret upstream body".into()));
        let (_, detail) = error.status_and_detail();
        assert_eq!(detail, "Internal server error");
    }
}
