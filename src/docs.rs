use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::healthcheck::controller::{HealthCheckResponse, SystemInfo};
use crate::modules::movies::model::{
    CreateMovieDto, MessageResponse, Movie, MovieResponse, MoviesResponse, UpdateMovieDto,
};
use crate::modules::tokens::model::{AuthTokenResponse, CreateAuthTokenDto, Token};
use crate::modules::users::model::{ActivateUserDto, RegisterUserDto, User, UserResponse};
use crate::utils::errors::ErrorResponse;
use crate::utils::pagination::Metadata;
use crate::utils::runtime::Runtime;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::healthcheck::controller::healthcheck,
        crate::modules::movies::controller::list_movies,
        crate::modules::movies::controller::create_movie,
        crate::modules::movies::controller::get_movie,
        crate::modules::movies::controller::update_movie,
        crate::modules::movies::controller::delete_movie,
        crate::modules::users::controller::register_user,
        crate::modules::users::controller::activate_user,
        crate::modules::tokens::controller::create_authentication_token,
    ),
    components(
        schemas(
            HealthCheckResponse,
            SystemInfo,
            Movie,
            Runtime,
            CreateMovieDto,
            UpdateMovieDto,
            MovieResponse,
            MoviesResponse,
            MessageResponse,
            Metadata,
            User,
            RegisterUserDto,
            ActivateUserDto,
            UserResponse,
            Token,
            CreateAuthTokenDto,
            AuthTokenResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Healthcheck", description = "Service health endpoints"),
        (name = "Movies", description = "Movie catalogue management"),
        (name = "Users", description = "User registration and activation"),
        (name = "Tokens", description = "Authentication token issuance")
    ),
    info(
        title = "Reelbase API",
        version = "0.1.0",
        description = "A movie catalogue REST API built with Rust, Axum, and PostgreSQL featuring stateful bearer-token authentication.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .build(),
                ),
            )
        }
    }
}
