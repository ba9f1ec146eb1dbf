//! Token persistence operations.

use chrono::Duration;
use sqlx::PgPool;

use crate::utils::db::with_timeout;
use crate::utils::errors::ModelError;

use super::model::Token;

pub struct TokenService;

impl TokenService {
    /// Generates a token for `user_id` and stores its hash.
    pub async fn new_token(
        db: &PgPool,
        user_id: i64,
        ttl: Duration,
        scope: &str,
    ) -> Result<Token, ModelError> {
        let token = Token::generate(user_id, ttl, scope);
        Self::insert(db, &token).await?;
        Ok(token)
    }

    pub async fn insert(db: &PgPool, token: &Token) -> Result<(), ModelError> {
        with_timeout(
            sqlx::query(
                "INSERT INTO tokens (hash, user_id, expiry, scope)
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(&token.hash)
            .bind(token.user_id)
            .bind(token.expiry)
            .bind(&token.scope)
            .execute(db),
        )
        .await?;

        Ok(())
    }

    /// Deletes every token a user holds for the given scope, e.g. all
    /// activation tokens once the account is activated.
    pub async fn delete_all_for_user(
        db: &PgPool,
        scope: &str,
        user_id: i64,
    ) -> Result<(), ModelError> {
        with_timeout(
            sqlx::query("DELETE FROM tokens WHERE scope = $1 AND user_id = $2")
                .bind(scope)
                .bind(user_id)
                .execute(db),
        )
        .await?;

        Ok(())
    }
}
