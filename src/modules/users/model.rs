//! User entity, password credential model, and user-facing DTOs.
//!
//! # Core Types
//!
//! - [`User`] - account row; `version` is the optimistic-concurrency counter
//!   bumped by the store on every successful update
//! - [`Password`] - plaintext/hash pair owned exclusively by its `User`;
//!   the hash is persisted, the plaintext never leaves memory
//!
//! An unauthenticated request is represented by the anonymous sentinel from
//! [`User::anonymous`] rather than an `Option`; it only carries identity
//! semantics and is never written to the store.

use bcrypt::{BcryptError, DEFAULT_COST};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Row;
use sqlx::postgres::PgRow;
use utoipa::ToSchema;

use crate::validator::{self, EMAIL_RX, Validator};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct User {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub name: String,
    pub email: String,
    #[serde(skip)]
    #[schema(ignore)]
    pub password: Password,
    pub activated: bool,
    #[serde(skip)]
    #[schema(ignore)]
    pub version: i32,
}

impl User {
    /// The zero-value sentinel standing in for an unauthenticated caller.
    pub fn anonymous() -> Self {
        Self {
            id: 0,
            created_at: DateTime::UNIX_EPOCH,
            name: String::new(),
            email: String::new(),
            password: Password::default(),
            activated: false,
            version: 0,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.id == 0
    }
}

impl sqlx::FromRow<'_, PgRow> for User {
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(User {
            id: row.try_get("id")?,
            created_at: row.try_get("created_at")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            password: Password::from_hash(row.try_get("password_hash")?),
            activated: row.try_get("activated")?,
            version: row.try_get("version")?,
        })
    }
}

/// A user's password credential.
///
/// Holds at most a transient plaintext (kept only so validation can check
/// it) and the bcrypt hash that actually gets persisted.
#[derive(Debug, Clone, Default)]
pub struct Password {
    plaintext: Option<String>,
    hash: Option<String>,
}

impl Password {
    /// Wraps a hash loaded from the store; no plaintext is available.
    pub fn from_hash(hash: String) -> Self {
        Self {
            plaintext: None,
            hash: Some(hash),
        }
    }

    /// Hashes `plaintext` with bcrypt (cost 12) and stores both values.
    /// A hashing failure is an infrastructure error, surfaced upstream as an
    /// opaque server error.
    pub fn set(&mut self, plaintext: &str) -> Result<(), BcryptError> {
        let hash = bcrypt::hash(plaintext, DEFAULT_COST)?;
        self.plaintext = Some(plaintext.to_string());
        self.hash = Some(hash);
        Ok(())
    }

    /// Compares `candidate` against the stored hash.
    ///
    /// A mismatch is `Ok(false)`, NOT an error; only genuine failures (such
    /// as a malformed stored hash) come back as `Err`, and those must never
    /// be treated as a successful match.
    pub fn matches(&self, candidate: &str) -> Result<bool, BcryptError> {
        bcrypt::verify(candidate, self.hash())
    }

    pub fn plaintext(&self) -> Option<&str> {
        self.plaintext.as_deref()
    }

    /// The stored hash.
    ///
    /// # Panics
    ///
    /// Panics when no hash has been set. A `User` reaching persistence (or a
    /// comparison) without a hash means a code path forgot to call
    /// [`Password::set`] — a defect, not a runtime condition.
    pub fn hash(&self) -> &str {
        match &self.hash {
            Some(hash) => hash,
            None => panic!("missing password hash"),
        }
    }

    pub fn has_hash(&self) -> bool {
        self.hash.is_some()
    }
}

pub fn validate_email(v: &mut Validator, email: &str) {
    v.check(!email.is_empty(), "email", "must be provided");
    v.check(
        validator::matches(email, &EMAIL_RX),
        "email",
        "must be a valid email address",
    );
}

pub fn validate_password_plaintext(v: &mut Validator, password: &str) {
    v.check(!password.is_empty(), "password", "must be provided");
    v.check(
        password.len() >= 8,
        "password",
        "must be at least 8 bytes long",
    );
    v.check(
        password.len() <= 72,
        "password",
        "must not be more than 72 bytes long",
    );
}

/// Field-level rules for a user about to be persisted.
///
/// # Panics
///
/// Panics when the user carries no password hash; see [`Password::hash`].
pub fn validate_user(v: &mut Validator, user: &User) {
    v.check(!user.name.is_empty(), "name", "must be provided");
    v.check(
        user.name.len() <= 500,
        "name",
        "must not be more than 500 bytes long",
    );

    validate_email(v, &user.email);

    if let Some(plaintext) = user.password.plaintext() {
        validate_password_plaintext(v, plaintext);
    }

    if !user.password.has_hash() {
        panic!("missing password hash");
    }
}

/// Body of `POST /api/users`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterUserDto {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Body of `PUT /api/users/activated`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ActivateUserDto {
    pub token: String,
}

/// Response envelope carrying a single user.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub user: User,
}
