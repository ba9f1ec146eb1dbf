//! User persistence operations.
//!
//! Every operation runs under the shared 3-second query deadline. Known
//! store conditions are translated into typed [`ModelError`] variants at
//! this boundary: unique-email violations become `DuplicateEmail`, missing
//! rows become `RecordNotFound`, and a failed optimistic update becomes
//! `EditConflict`. Anything else propagates unchanged.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use sqlx::PgPool;

use crate::utils::db::with_timeout;
use crate::utils::errors::ModelError;

use super::model::User;

pub struct UserService;

impl UserService {
    /// Inserts a new user, filling in its store-assigned `id`, `created_at`,
    /// and `version`.
    pub async fn insert(db: &PgPool, user: &mut User) -> Result<(), ModelError> {
        let row: (i64, DateTime<Utc>, i32) = with_timeout(
            sqlx::query_as(
                "INSERT INTO users (name, email, password_hash, activated)
                 VALUES ($1, $2, $3, $4)
                 RETURNING id, created_at, version",
            )
            .bind(&user.name)
            .bind(&user.email)
            .bind(user.password.hash())
            .bind(user.activated)
            .fetch_one(db),
        )
        .await
        .map_err(ModelError::map_unique_email)?;

        (user.id, user.created_at, user.version) = row;

        Ok(())
    }

    pub async fn get_by_email(db: &PgPool, email: &str) -> Result<User, ModelError> {
        let user = with_timeout(
            sqlx::query_as::<_, User>(
                "SELECT id, created_at, name, email, password_hash, activated, version
                 FROM users
                 WHERE email = $1",
            )
            .bind(email)
            .fetch_optional(db),
        )
        .await?
        .ok_or(ModelError::RecordNotFound)?;

        Ok(user)
    }

    /// Optimistic-concurrency update keyed on `(id, version)`.
    ///
    /// A row that no longer exists and a row with a newer version are
    /// indistinguishable here; both surface as [`ModelError::EditConflict`]
    /// and the caller must re-fetch and retry.
    pub async fn update(db: &PgPool, user: &mut User) -> Result<(), ModelError> {
        let row: Option<(i32,)> = with_timeout(
            sqlx::query_as(
                "UPDATE users
                 SET name = $1, email = $2, password_hash = $3, activated = $4,
                     version = version + 1
                 WHERE id = $5 AND version = $6
                 RETURNING version",
            )
            .bind(&user.name)
            .bind(&user.email)
            .bind(user.password.hash())
            .bind(user.activated)
            .bind(user.id)
            .bind(user.version)
            .fetch_optional(db),
        )
        .await
        .map_err(ModelError::map_unique_email)?;

        match row {
            Some((version,)) => {
                user.version = version;
                Ok(())
            }
            None => Err(ModelError::EditConflict),
        }
    }

    /// Finds the user owning an unexpired token with the given scope.
    ///
    /// The plaintext is hashed here; only the hash ever touches the query.
    pub async fn get_for_token(
        db: &PgPool,
        scope: &str,
        token_plaintext: &str,
    ) -> Result<User, ModelError> {
        let token_hash = Sha256::digest(token_plaintext.as_bytes()).to_vec();

        let user = with_timeout(
            sqlx::query_as::<_, User>(
                "SELECT users.id, users.created_at, users.name, users.email,
                        users.password_hash, users.activated, users.version
                 FROM users
                 INNER JOIN tokens ON users.id = tokens.user_id
                 WHERE tokens.hash = $1
                 AND tokens.scope = $2
                 AND tokens.expiry > $3",
            )
            .bind(token_hash)
            .bind(scope)
            .bind(Utc::now())
            .fetch_optional(db),
        )
        .await?
        .ok_or(ModelError::RecordNotFound)?;

        Ok(user)
    }
}
