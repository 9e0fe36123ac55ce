//! Application error type and its HTTP mapping.
//!
//! Every layer returns [`AppError`]. Validation failures carry a
//! [`ValidationKind`] so the boundary layer can answer each rejection reason
//! with its own status code and stable error code.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::utils::url_validator::UrlValidationError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload returned to clients.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Reason a client-supplied value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationKind {
    /// Malformed, empty or over-long URL.
    InvalidUrl,
    /// Host is on the configured block list.
    BlockedDomain,
    /// Host points back at this service.
    SelfReferential,
    /// Scheme other than `http` or `https`.
    SchemeNotAllowed,
    /// Malformed request body or parameters.
    Request,
}

impl ValidationKind {
    fn status(self) -> StatusCode {
        match self {
            ValidationKind::InvalidUrl
            | ValidationKind::SchemeNotAllowed
            | ValidationKind::Request => StatusCode::BAD_REQUEST,
            ValidationKind::BlockedDomain => StatusCode::FORBIDDEN,
            ValidationKind::SelfReferential => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    /// Stable machine-readable code used in error bodies.
    pub fn code(self) -> &'static str {
        match self {
            ValidationKind::InvalidUrl => "invalid_url",
            ValidationKind::BlockedDomain => "blocked_domain",
            ValidationKind::SelfReferential => "self_referential",
            ValidationKind::SchemeNotAllowed => "scheme_not_allowed",
            ValidationKind::Request => "validation_error",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation {
        kind: ValidationKind,
        message: String,
        details: Value,
    },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    #[error("{message}")]
    Conflict { message: String, details: Value },
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::validation(ValidationKind::Request, message, details)
    }
    pub fn validation(kind: ValidationKind, message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            kind,
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Returns the validation kind, if this is a validation error.
    pub fn validation_kind(&self) -> Option<ValidationKind> {
        match self {
            AppError::Validation { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation { kind, .. } => (kind.status(), kind.code()),
            AppError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Conflict { .. } => (StatusCode::CONFLICT, "conflict"),
            AppError::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }

    /// Converts the error into its client-facing payload.
    ///
    /// Internal details are logged and replaced with an empty object.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (_, code) = self.status_and_code();
        match self {
            AppError::Internal { message, details } => {
                tracing::error!(error_message = %message, %details, "internal error");
                ErrorInfo {
                    code,
                    message: "Internal server error".to_string(),
                    details: json!({}),
                }
            }
            AppError::Validation {
                message, details, ..
            }
            | AppError::NotFound { message, details }
            | AppError::Conflict { message, details } => ErrorInfo {
                code,
                message: message.clone(),
                details: details.clone(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, _) = self.status_and_code();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<UrlValidationError> for AppError {
    fn from(e: UrlValidationError) -> Self {
        let kind = match e {
            UrlValidationError::InvalidFormat(_) => ValidationKind::InvalidUrl,
            UrlValidationError::SchemeNotAllowed(_) => ValidationKind::SchemeNotAllowed,
            UrlValidationError::SelfReferential(_) => ValidationKind::SelfReferential,
            UrlValidationError::BlockedDomain(_) => ValidationKind::BlockedDomain,
        };
        AppError::validation(kind, e.to_string(), json!({ "reason": kind.code() }))
    }
}
