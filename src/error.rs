use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::response::Envelope;

/// Every failure crossing the usecase boundary is one of these kinds.
/// Handlers never see raw driver or hashing errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    Conflict(String),
    #[error("internal server error")]
    Internal { system: String },
    #[error("{message}")]
    Custom {
        status: StatusCode,
        code: String,
        message: String,
    },
}

impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn internal(system: impl Into<String>) -> Self {
        Self::Internal {
            system: system.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Custom { status, .. } => *status,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let envelope = match &self {
            AppError::Internal { system } => {
                tracing::error!(system_message = %system, "internal error");
                Envelope::error(status, "Internal Server Error").with_system_message(system)
            }
            AppError::Custom { code, message, .. } => {
                Envelope::error(status, message).with_code(code)
            }
            other => Envelope::error(status, &other.to_string()),
        };
        (status, axum::Json(envelope)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_map_to_expected_statuses() {
        assert_eq!(
            AppError::bad_request("nope").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Unauthorized("no".into()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Forbidden("no".into()).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(AppError::conflict("dup").status(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::internal("boom").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn custom_error_carries_its_own_status() {
        let err = AppError::Custom {
            status: StatusCode::TOO_MANY_REQUESTS,
            code: "USR-429".into(),
            message: "slow down".into(),
        };
        assert_eq!(err.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(err.to_string(), "slow down");
    }

    #[test]
    fn internal_message_hides_system_detail() {
        let err = AppError::internal("pg driver said something scary");
        assert_eq!(err.to_string(), "internal server error");
    }
}
