use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use crate::middleware::auth::ActivatedUser;
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};
use crate::utils::pagination::{Filters, validate_filters};
use crate::validator::Validator;

use super::model::{
    CreateMovieDto, ListMoviesQuery, MessageResponse, Movie, MovieResponse, MoviesResponse,
    UpdateMovieDto, validate_movie,
};
use super::service::MovieService;

/// Columns a caller may sort the listing by.
const SORT_SAFE_LIST: [&str; 4] = ["id", "title", "year", "runtime"];

/// Parses an optional raw query value as an integer, recording a validation
/// error (and returning the default) when it isn't one.
fn read_int(v: &mut Validator, value: Option<&str>, default: i64, key: &str) -> i64 {
    match value {
        None | Some("") => default,
        Some(raw) => match raw.parse() {
            Ok(n) => n,
            Err(_) => {
                v.add_error(key, "must be an integer value");
                default
            }
        },
    }
}

/// List movies with filtering, sorting, and pagination
#[utoipa::path(
    get,
    path = "/api/movies",
    params(
        ("title" = Option<String>, Query, description = "Full-text title filter"),
        ("genres" = Option<String>, Query, description = "Comma-separated genres, all required"),
        ("page" = Option<String>, Query, description = "Page number (default 1)"),
        ("page_size" = Option<String>, Query, description = "Page size (default 20, max 100)"),
        ("sort" = Option<String>, Query, description = "Sort column, '-' prefix for descending"),
    ),
    responses(
        (status = 200, description = "Page of movies with metadata", body = MoviesResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Movies"
)]
#[instrument(skip(state, _user))]
pub async fn list_movies(
    State(state): State<AppState>,
    _user: ActivatedUser,
    Query(query): Query<ListMoviesQuery>,
) -> Result<Json<MoviesResponse>, AppError> {
    let mut v = Validator::new();

    let title = query.title.unwrap_or_default();
    let genres: Vec<String> = query
        .genres
        .map(|csv| csv.split(',').map(str::to_string).collect())
        .unwrap_or_default();

    let filters = Filters {
        page: read_int(&mut v, query.page.as_deref(), 1, "page"),
        page_size: read_int(&mut v, query.page_size.as_deref(), 20, "page_size"),
        sort: query.sort.unwrap_or_else(|| "id".to_string()),
        sort_safe_list: SORT_SAFE_LIST.to_vec(),
    };

    validate_filters(&mut v, &filters);
    if !v.valid() {
        return Err(AppError::failed_validation(v.errors));
    }

    let (movies, metadata) = MovieService::list(&state.db, &title, &genres, &filters).await?;

    Ok(Json(MoviesResponse { movies, metadata }))
}

/// Create a new movie
#[utoipa::path(
    post,
    path = "/api/movies",
    request_body = CreateMovieDto,
    responses(
        (status = 201, description = "Movie created", body = MovieResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Movies"
)]
#[instrument(skip(state, _user, dto))]
pub async fn create_movie(
    State(state): State<AppState>,
    _user: ActivatedUser,
    Json(dto): Json<CreateMovieDto>,
) -> Result<(StatusCode, Json<MovieResponse>), AppError> {
    let mut movie = Movie {
        id: 0,
        created_at: chrono::DateTime::UNIX_EPOCH,
        title: dto.title,
        year: dto.year,
        runtime: dto.runtime,
        genres: dto.genres,
        version: 0,
    };

    let mut v = Validator::new();
    validate_movie(&mut v, &movie);
    if !v.valid() {
        return Err(AppError::failed_validation(v.errors));
    }

    MovieService::insert(&state.db, &mut movie).await?;

    Ok((StatusCode::CREATED, Json(MovieResponse { movie })))
}

/// Fetch a single movie by id
#[utoipa::path(
    get,
    path = "/api/movies/{id}",
    params(("id" = i64, Path, description = "Movie id")),
    responses(
        (status = 200, description = "The movie", body = MovieResponse),
        (status = 404, description = "Movie not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Movies"
)]
#[instrument(skip(state, _user))]
pub async fn get_movie(
    State(state): State<AppState>,
    _user: ActivatedUser,
    Path(id): Path<i64>,
) -> Result<Json<MovieResponse>, AppError> {
    let movie = MovieService::get(&state.db, id).await?;
    Ok(Json(MovieResponse { movie }))
}

/// Partially update a movie
///
/// Fields absent from the body keep their stored values. A concurrent edit
/// between the read and the write surfaces as a 409; the client should
/// re-fetch and retry.
#[utoipa::path(
    patch,
    path = "/api/movies/{id}",
    params(("id" = i64, Path, description = "Movie id")),
    request_body = UpdateMovieDto,
    responses(
        (status = 200, description = "Updated movie", body = MovieResponse),
        (status = 404, description = "Movie not found", body = ErrorResponse),
        (status = 409, description = "Edit conflict, retry the request", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Movies"
)]
#[instrument(skip(state, _user, dto))]
pub async fn update_movie(
    State(state): State<AppState>,
    _user: ActivatedUser,
    Path(id): Path<i64>,
    Json(dto): Json<UpdateMovieDto>,
) -> Result<Json<MovieResponse>, AppError> {
    let mut movie = MovieService::get(&state.db, id).await?;

    if let Some(title) = dto.title {
        movie.title = title;
    }
    if let Some(year) = dto.year {
        movie.year = year;
    }
    if let Some(runtime) = dto.runtime {
        movie.runtime = runtime;
    }
    if let Some(genres) = dto.genres {
        movie.genres = genres;
    }

    let mut v = Validator::new();
    validate_movie(&mut v, &movie);
    if !v.valid() {
        return Err(AppError::failed_validation(v.errors));
    }

    MovieService::update(&state.db, &mut movie).await?;

    Ok(Json(MovieResponse { movie }))
}

/// Delete a movie
#[utoipa::path(
    delete,
    path = "/api/movies/{id}",
    params(("id" = i64, Path, description = "Movie id")),
    responses(
        (status = 200, description = "Movie deleted", body = MessageResponse),
        (status = 404, description = "Movie not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Movies"
)]
#[instrument(skip(state, _user))]
pub async fn delete_movie(
    State(state): State<AppState>,
    _user: ActivatedUser,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    MovieService::delete(&state.db, id).await?;

    Ok(Json(MessageResponse {
        message: "movie successfully deleted".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_int_defaults() {
        let mut v = Validator::new();
        assert_eq!(read_int(&mut v, None, 1, "page"), 1);
        assert_eq!(read_int(&mut v, Some(""), 20, "page_size"), 20);
        assert!(v.valid());
    }

    #[test]
    fn test_read_int_parses_values() {
        let mut v = Validator::new();
        assert_eq!(read_int(&mut v, Some("7"), 1, "page"), 7);
        assert_eq!(read_int(&mut v, Some("-3"), 1, "page"), -3);
        assert!(v.valid());
    }

    #[test]
    fn test_read_int_rejects_non_integers() {
        let mut v = Validator::new();
        assert_eq!(read_int(&mut v, Some("abc"), 1, "page"), 1);
        assert_eq!(v.errors["page"], "must be an integer value");
    }
}
