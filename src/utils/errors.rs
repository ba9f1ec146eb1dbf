//! Application error types and handling.
//!
//! Two layers: [`ModelError`] is returned by the store-facing services and
//! carries the typed conditions callers branch on (not-found, duplicate
//! email, edit conflict). [`AppError`] is the HTTP boundary type; handlers
//! convert or bubble `ModelError` into it and axum renders it as a JSON
//! `{"error": ...}` body.

use std::collections::HashMap;

use anyhow::{Error, anyhow};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error as ThisError;
use utoipa::ToSchema;

/// Typed errors from the persistence layer.
///
/// The known conditions are translated at the store boundary; everything
/// else passes through as [`ModelError::Sqlx`] for the caller to treat as an
/// opaque server failure.
#[derive(Debug, ThisError)]
pub enum ModelError {
    #[error("record not found")]
    RecordNotFound,
    #[error("duplicate email")]
    DuplicateEmail,
    #[error("edit conflict")]
    EditConflict,
    #[error("database operation timed out")]
    Timeout,
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl ModelError {
    /// Translates a unique violation on `users_email_key` into
    /// [`ModelError::DuplicateEmail`], leaving other errors untouched.
    pub(crate) fn map_unique_email(self) -> Self {
        match &self {
            ModelError::Sqlx(sqlx::Error::Database(db))
                if db.constraint() == Some("users_email_key") =>
            {
                ModelError::DuplicateEmail
            }
            _ => self,
        }
    }
}

/// Standard JSON error body, documented for OpenAPI.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
    /// Per-field messages for failed validation; rendered as the error body
    /// instead of the message when present.
    pub fields: Option<HashMap<String, String>>,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
            fields: None,
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn unauthorized<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNAUTHORIZED, err)
    }

    pub fn forbidden<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::FORBIDDEN, err)
    }

    pub fn conflict<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::CONFLICT, err)
    }

    /// 422 with the validator's accumulated `field -> message` map.
    pub fn failed_validation(errors: HashMap<String, String>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            error: anyhow!("one or more validation checks failed"),
            fields: Some(errors),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(error = %self.error, "request failed");
        }

        let body = match self.fields {
            Some(fields) => Json(json!({ "error": fields })),
            None => Json(json!({ "error": self.error.to_string() })),
        };

        (self.status, body).into_response()
    }
}

impl From<ModelError> for AppError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::RecordNotFound => {
                AppError::not_found(anyhow!("the requested resource could not be found"))
            }
            ModelError::EditConflict => AppError::conflict(anyhow!(
                "unable to update the record due to an edit conflict, please try again"
            )),
            ModelError::DuplicateEmail => {
                // Callers normally intercept this and attach a field error;
                // reaching here means an unhandled uniqueness clash.
                AppError::new(StatusCode::UNPROCESSABLE_ENTITY, err)
            }
            ModelError::Timeout | ModelError::Sqlx(_) => AppError::internal(err),
        }
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(err: bcrypt::BcryptError) -> Self {
        AppError::internal(err)
    }
}
