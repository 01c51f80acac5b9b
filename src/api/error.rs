use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use crate::error::Error;

#[derive(Debug)]
pub enum ApiError {
    Ledger(Error),
    Internal(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        ApiError::Ledger(e)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Ledger(Error::InvalidAmount { .. }) => StatusCode::BAD_REQUEST,
            ApiError::Ledger(Error::InsufficientBalance { .. }) => StatusCode::CONFLICT,
            ApiError::Ledger(Error::BalanceOverflow { .. })
            | ApiError::Ledger(Error::BalanceLimitExceeded { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::Ledger(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Ledger(e) => ErrorResponse {
                code: e.reason().to_string(),
                message: e.to_string(),
            },
            ApiError::Internal(message) => {
                tracing::error!("Internal API error: {}", message);
                ErrorResponse {
                    code: "internal_error".to_string(),
                    message,
                }
            }
        };

        (status, Json(body)).into_response()
    }
}
