use anyhow::anyhow;
use axum::{Json, extract::State, http::StatusCode};
use chrono::Duration;
use tracing::instrument;

use crate::modules::users::model::{validate_email, validate_password_plaintext};
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse, ModelError};
use crate::validator::Validator;

use super::model::{AuthTokenResponse, CreateAuthTokenDto, SCOPE_AUTHENTICATION};
use super::service::TokenService;

/// Exchange email and password for a 24-hour bearer token
///
/// Unknown emails and wrong passwords both produce the same 401; the
/// response never reveals which half of the credentials failed.
#[utoipa::path(
    post,
    path = "/api/tokens/authentication",
    request_body = CreateAuthTokenDto,
    responses(
        (status = 201, description = "Authentication token issued", body = AuthTokenResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Tokens"
)]
#[instrument(skip(state, dto), fields(email = %dto.email))]
pub async fn create_authentication_token(
    State(state): State<AppState>,
    Json(dto): Json<CreateAuthTokenDto>,
) -> Result<(StatusCode, Json<AuthTokenResponse>), AppError> {
    let mut v = Validator::new();
    validate_email(&mut v, &dto.email);
    validate_password_plaintext(&mut v, &dto.password);
    if !v.valid() {
        return Err(AppError::failed_validation(v.errors));
    }

    let user = match UserService::get_by_email(&state.db, &dto.email).await {
        Ok(user) => user,
        Err(ModelError::RecordNotFound) => {
            return Err(AppError::unauthorized(anyhow!(
                "invalid authentication credentials"
            )));
        }
        Err(err) => return Err(err.into()),
    };

    if !user.password.matches(&dto.password)? {
        return Err(AppError::unauthorized(anyhow!(
            "invalid authentication credentials"
        )));
    }

    let token =
        TokenService::new_token(&state.db, user.id, Duration::hours(24), SCOPE_AUTHENTICATION)
            .await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthTokenResponse {
            authentication_token: token,
        }),
    ))
}
