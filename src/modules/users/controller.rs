use axum::{Json, extract::State, http::StatusCode};
use chrono::Duration;
use tracing::{error, instrument};

use crate::modules::tokens::model::{SCOPE_ACTIVATION, validate_token_plaintext};
use crate::modules::tokens::service::TokenService;
use crate::state::AppState;
use crate::utils::email::EmailService;
use crate::utils::errors::{AppError, ErrorResponse, ModelError};
use crate::validator::Validator;

use super::model::{
    ActivateUserDto, Password, RegisterUserDto, User, UserResponse, validate_user,
};
use super::service::UserService;

/// Register a new user account
///
/// The account starts deactivated; a one-time activation token is emailed to
/// the address on file.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = RegisterUserDto,
    responses(
        (status = 202, description = "User registered, activation email queued", body = UserResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip(state, dto), fields(email = %dto.email))]
pub async fn register_user(
    State(state): State<AppState>,
    Json(dto): Json<RegisterUserDto>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let mut user = User {
        name: dto.name,
        email: dto.email,
        password: Password::default(),
        activated: false,
        ..User::anonymous()
    };
    user.password.set(&dto.password)?;

    let mut v = Validator::new();
    validate_user(&mut v, &user);
    if !v.valid() {
        return Err(AppError::failed_validation(v.errors));
    }

    match UserService::insert(&state.db, &mut user).await {
        Ok(()) => {}
        Err(ModelError::DuplicateEmail) => {
            v.add_error("email", "a user with this email address already exists");
            return Err(AppError::failed_validation(v.errors));
        }
        Err(err) => return Err(err.into()),
    }

    let token = TokenService::new_token(&state.db, user.id, Duration::days(3), SCOPE_ACTIVATION)
        .await?;

    // Delivery happens off the request path; a mail failure must not undo a
    // completed registration.
    let mailer = EmailService::new(state.email_config.clone());
    let (email, name, user_id) = (user.email.clone(), user.name.clone(), user.id);
    tokio::spawn(async move {
        if let Err(err) = mailer
            .send_welcome_email(&email, &name, user_id, &token.plaintext)
            .await
        {
            error!(error = %err.error, user_id, "failed to send welcome email");
        }
    });

    Ok((StatusCode::ACCEPTED, Json(UserResponse { user })))
}

/// Activate a user account with an emailed activation token
#[utoipa::path(
    put,
    path = "/api/users/activated",
    request_body = ActivateUserDto,
    responses(
        (status = 200, description = "Account activated", body = UserResponse),
        (status = 409, description = "Edit conflict, retry the request", body = ErrorResponse),
        (status = 422, description = "Invalid or expired token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip(state, dto))]
pub async fn activate_user(
    State(state): State<AppState>,
    Json(dto): Json<ActivateUserDto>,
) -> Result<Json<UserResponse>, AppError> {
    let mut v = Validator::new();
    validate_token_plaintext(&mut v, &dto.token);
    if !v.valid() {
        return Err(AppError::failed_validation(v.errors));
    }

    let mut user = match UserService::get_for_token(&state.db, SCOPE_ACTIVATION, &dto.token).await
    {
        Ok(user) => user,
        Err(ModelError::RecordNotFound) => {
            v.add_error("token", "invalid or expired activation token");
            return Err(AppError::failed_validation(v.errors));
        }
        Err(err) => return Err(err.into()),
    };

    user.activated = true;
    UserService::update(&state.db, &mut user).await?;

    TokenService::delete_all_for_user(&state.db, SCOPE_ACTIVATION, user.id).await?;

    Ok(Json(UserResponse { user }))
}
