//! Authentication extractors.
//!
//! # Authentication Flow
//!
//! 1. Client sends `Authorization: Bearer <token>` with a plaintext token
//!    issued by `POST /api/tokens/authentication`
//! 2. [`AuthUser`] hashes the plaintext and resolves it to a user through
//!    the tokens table (scope + unexpired only)
//! 3. A request with no Authorization header resolves to the anonymous
//!    user rather than failing, so handlers can distinguish "not logged in"
//!    from "bad credentials"
//! 4. [`ActivatedUser`] layers on top for routes that require a real,
//!    activated account

use anyhow::anyhow;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::modules::tokens::model::{SCOPE_AUTHENTICATION, validate_token_plaintext};
use crate::modules::users::model::User;
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::utils::errors::{AppError, ModelError};
use crate::validator::Validator;

/// The caller's identity: a real user, or the anonymous sentinel when no
/// Authorization header was sent.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(auth_header) = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
        else {
            return Ok(AuthUser(User::anonymous()));
        };

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::unauthorized(anyhow!("invalid or missing authentication token"))
        })?;

        let mut v = Validator::new();
        validate_token_plaintext(&mut v, token);
        if !v.valid() {
            return Err(AppError::unauthorized(anyhow!(
                "invalid or missing authentication token"
            )));
        }

        match UserService::get_for_token(&state.db, SCOPE_AUTHENTICATION, token).await {
            Ok(user) => Ok(AuthUser(user)),
            Err(ModelError::RecordNotFound) => Err(AppError::unauthorized(anyhow!(
                "invalid or missing authentication token"
            ))),
            Err(err) => Err(err.into()),
        }
    }
}

/// Extractor for routes that require an authenticated, activated account.
#[derive(Debug, Clone)]
pub struct ActivatedUser(pub User);

impl FromRequestParts<AppState> for ActivatedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;

        if user.is_anonymous() {
            return Err(AppError::unauthorized(anyhow!(
                "you must be authenticated to access this resource"
            )));
        }

        if !user.activated {
            return Err(AppError::forbidden(anyhow!(
                "your user account must be activated to access this resource"
            )));
        }

        Ok(ActivatedUser(user))
    }
}
