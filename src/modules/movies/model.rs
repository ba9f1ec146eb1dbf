//! Movie entity and request/response DTOs.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::utils::pagination::Metadata;
use crate::utils::runtime::Runtime;
use crate::validator::{Validator, unique};

/// A movie record.
///
/// `version` backs optimistic concurrency on updates; `created_at` is kept
/// out of responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
pub struct Movie {
    pub id: i64,
    #[serde(skip)]
    #[schema(ignore)]
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub year: i32,
    pub runtime: Runtime,
    pub genres: Vec<String>,
    pub version: i32,
}

/// Earliest valid release year (the first motion picture).
const FIRST_MOVIE_YEAR: i32 = 1888;

pub fn validate_movie(v: &mut Validator, movie: &Movie) {
    v.check(!movie.title.is_empty(), "title", "must be provided");
    v.check(
        movie.title.len() <= 500,
        "title",
        "must not be more than 500 bytes long",
    );

    v.check(movie.year != 0, "year", "must be provided");
    v.check(
        movie.year >= FIRST_MOVIE_YEAR,
        "year",
        "must be greater than 1888",
    );
    v.check(
        movie.year <= Utc::now().year(),
        "year",
        "must not be in the future",
    );

    v.check(movie.runtime.minutes() != 0, "runtime", "must be provided");
    v.check(
        movie.runtime.minutes() > 0,
        "runtime",
        "must be a positive integer",
    );

    v.check(!movie.genres.is_empty(), "genres", "must contain at least 1 genre");
    v.check(
        movie.genres.len() <= 5,
        "genres",
        "must not contain more than 5 genres",
    );
    v.check(
        unique(&movie.genres),
        "genres",
        "must not contain duplicate values",
    );
}

/// Body of `POST /api/movies`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateMovieDto {
    pub title: String,
    pub year: i32,
    pub runtime: Runtime,
    pub genres: Vec<String>,
}

/// Body of `PATCH /api/movies/{id}`; absent fields keep their stored values.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateMovieDto {
    pub title: Option<String>,
    pub year: Option<i32>,
    pub runtime: Option<Runtime>,
    pub genres: Option<Vec<String>>,
}

/// Raw list query parameters.
///
/// Numeric parameters arrive as strings so that a value like `page=abc`
/// becomes a field-level validation error rather than a transport-level
/// rejection.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ListMoviesQuery {
    pub title: Option<String>,
    /// Comma-separated genre list; every listed genre must be present.
    pub genres: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub sort: Option<String>,
}

/// Response envelope carrying a single movie.
#[derive(Debug, Serialize, ToSchema)]
pub struct MovieResponse {
    pub movie: Movie,
}

/// Response envelope for the list endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct MoviesResponse {
    pub movies: Vec<Movie>,
    pub metadata: Metadata,
}

/// Confirmation body for deletes.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
