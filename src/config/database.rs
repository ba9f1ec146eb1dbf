//! Database connection pool initialization.
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `DATABASE_MAX_CONNECTIONS`: pool size cap (default 25)
//!
//! # Panics
//!
//! [`init_db_pool`] panics when `DATABASE_URL` is unset or the initial
//! connection fails; there is nothing useful the server can do without a
//! database.

use std::env;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Initializes the PostgreSQL connection pool shared by all request tasks.
///
/// Called once at startup; the returned pool is cheaply cloneable and lives
/// in [`AppState`](crate::state::AppState).
pub async fn init_db_pool() -> PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(25);

    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database")
}
