//! Stateful bearer tokens.
//!
//! A token's random plaintext is handed to the client exactly once; only its
//! SHA-256 hash is stored. Lookups join users through
//! `(hash, scope, expiry > now)`, so expired and unknown tokens are
//! indistinguishable from absent ones.

use chrono::{DateTime, Duration, Utc};
use data_encoding::BASE32_NOPAD;
use rand::RngCore;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use utoipa::ToSchema;

use crate::validator::Validator;

pub const SCOPE_ACTIVATION: &str = "activation";
pub const SCOPE_AUTHENTICATION: &str = "authentication";

/// Length of the base32-encoded plaintext handed to clients.
pub const PLAINTEXT_LEN: usize = 26;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Token {
    #[serde(rename = "token")]
    pub plaintext: String,
    #[serde(skip)]
    #[schema(ignore)]
    pub hash: Vec<u8>,
    #[serde(skip)]
    #[schema(ignore)]
    pub user_id: i64,
    pub expiry: DateTime<Utc>,
    #[serde(skip)]
    #[schema(ignore)]
    pub scope: String,
}

impl Token {
    /// Builds a fresh token from 16 bytes of OS randomness. The plaintext is
    /// base32 (no padding), always 26 characters.
    pub fn generate(user_id: i64, ttl: Duration, scope: &str) -> Self {
        let mut random_bytes = [0u8; 16];
        OsRng.fill_bytes(&mut random_bytes);

        let plaintext = BASE32_NOPAD.encode(&random_bytes);
        let hash = Sha256::digest(plaintext.as_bytes()).to_vec();

        Self {
            plaintext,
            hash,
            user_id,
            expiry: Utc::now() + ttl,
            scope: scope.to_string(),
        }
    }
}

pub fn validate_token_plaintext(v: &mut Validator, token_plaintext: &str) {
    v.check(!token_plaintext.is_empty(), "token", "must be provided");
    v.check(
        token_plaintext.len() == PLAINTEXT_LEN,
        "token",
        "must be 26 bytes long",
    );
}

/// Body of `POST /api/tokens/authentication`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAuthTokenDto {
    pub email: String,
    pub password: String,
}

/// Response envelope carrying a freshly issued authentication token.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthTokenResponse {
    pub authentication_token: Token,
}
