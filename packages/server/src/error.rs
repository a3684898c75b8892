//! Application-level error type returned by handlers.
//!
//! Every variant becomes a plain-text response. Upstream and decoding
//! failures surface their message verbatim; there is no local recovery.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use vindu::DecodeError;

use crate::sparql::SparqlError;

/// An error that a handler can return; converts directly to an HTTP response.
#[derive(Debug)]
pub enum AppError {
    /// The outbound request could not be built.
    BadRequest(String),
    /// Unknown resource (empty description) or an unserved path.
    NotFound,
    /// Upstream transport, status, or decoding failure.
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound => (StatusCode::NOT_FOUND, "Not Found".to_string()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, format!("{message}\n")).into_response()
    }
}

impl From<SparqlError> for AppError {
    fn from(e: SparqlError) -> Self {
        match e {
            SparqlError::InvalidRequest(msg) => AppError::BadRequest(msg),
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<DecodeError> for AppError {
    fn from(e: DecodeError) -> Self {
        AppError::Internal(e.to_string())
    }
}
