//! Movie persistence operations.
//!
//! The list query interpolates its `ORDER BY` clause from
//! [`Filters::sort_column`]/[`Filters::sort_direction`]; the safe-list check
//! inside `sort_column` is what keeps that interpolation injection-proof.
//! Everything user-supplied beyond the column name is bound as a parameter.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::utils::db::with_timeout;
use crate::utils::errors::ModelError;
use crate::utils::pagination::{Filters, Metadata, calculate_metadata};
use crate::utils::runtime::Runtime;

use super::model::Movie;

#[derive(FromRow)]
struct MovieListRow {
    total_records: i64,
    id: i64,
    created_at: DateTime<Utc>,
    title: String,
    year: i32,
    runtime: Runtime,
    genres: Vec<String>,
    version: i32,
}

pub struct MovieService;

impl MovieService {
    pub async fn insert(db: &PgPool, movie: &mut Movie) -> Result<(), ModelError> {
        let row: (i64, DateTime<Utc>, i32) = with_timeout(
            sqlx::query_as(
                "INSERT INTO movies (title, year, runtime, genres)
                 VALUES ($1, $2, $3, $4)
                 RETURNING id, created_at, version",
            )
            .bind(&movie.title)
            .bind(movie.year)
            .bind(movie.runtime)
            .bind(&movie.genres)
            .fetch_one(db),
        )
        .await?;

        (movie.id, movie.created_at, movie.version) = row;

        Ok(())
    }

    pub async fn get(db: &PgPool, id: i64) -> Result<Movie, ModelError> {
        if id < 1 {
            return Err(ModelError::RecordNotFound);
        }

        let movie = with_timeout(
            sqlx::query_as::<_, Movie>(
                "SELECT id, created_at, title, year, runtime, genres, version
                 FROM movies
                 WHERE id = $1",
            )
            .bind(id)
            .fetch_optional(db),
        )
        .await?
        .ok_or(ModelError::RecordNotFound)?;

        Ok(movie)
    }

    /// Optimistic-concurrency update keyed on `(id, version)`; a miss on
    /// either collapses into [`ModelError::EditConflict`].
    pub async fn update(db: &PgPool, movie: &mut Movie) -> Result<(), ModelError> {
        let row: Option<(i32,)> = with_timeout(
            sqlx::query_as(
                "UPDATE movies
                 SET title = $1, year = $2, runtime = $3, genres = $4, version = version + 1
                 WHERE id = $5 AND version = $6
                 RETURNING version",
            )
            .bind(&movie.title)
            .bind(movie.year)
            .bind(movie.runtime)
            .bind(&movie.genres)
            .bind(movie.id)
            .bind(movie.version)
            .fetch_optional(db),
        )
        .await?;

        match row {
            Some((version,)) => {
                movie.version = version;
                Ok(())
            }
            None => Err(ModelError::EditConflict),
        }
    }

    pub async fn delete(db: &PgPool, id: i64) -> Result<(), ModelError> {
        if id < 1 {
            return Err(ModelError::RecordNotFound);
        }

        let result = with_timeout(
            sqlx::query("DELETE FROM movies WHERE id = $1")
                .bind(id)
                .execute(db),
        )
        .await?;

        if result.rows_affected() == 0 {
            return Err(ModelError::RecordNotFound);
        }

        Ok(())
    }

    /// Filtered, sorted, paginated listing.
    ///
    /// An empty `title` matches everything; `genres` is a containment filter
    /// (every listed genre must be present). The window count feeds the
    /// response metadata without a second query.
    pub async fn list(
        db: &PgPool,
        title: &str,
        genres: &[String],
        filters: &Filters,
    ) -> Result<(Vec<Movie>, Metadata), ModelError> {
        let query = format!(
            "SELECT count(*) OVER() AS total_records,
                    id, created_at, title, year, runtime, genres, version
             FROM movies
             WHERE (to_tsvector('simple', title) @@ plainto_tsquery('simple', $1) OR $1 = '')
             AND (genres @> $2 OR $2 = '{{}}')
             ORDER BY {} {}, id ASC
             LIMIT $3 OFFSET $4",
            filters.sort_column(),
            filters.sort_direction(),
        );

        let rows: Vec<MovieListRow> = with_timeout(
            sqlx::query_as(&query)
                .bind(title)
                .bind(genres)
                .bind(filters.limit())
                .bind(filters.offset())
                .fetch_all(db),
        )
        .await?;

        let total_records = rows.first().map_or(0, |row| row.total_records);
        let metadata = calculate_metadata(total_records, filters.page, filters.page_size);

        let movies = rows
            .into_iter()
            .map(|row| Movie {
                id: row.id,
                created_at: row.created_at,
                title: row.title,
                year: row.year,
                runtime: row.runtime,
                genres: row.genres,
                version: row.version,
            })
            .collect();

        Ok((movies, metadata))
    }
}
