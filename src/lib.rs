//! # Reelbase API
//!
//! A movie catalogue REST API built with Rust, Axum, and PostgreSQL,
//! exposing movie records behind stateful bearer-token authentication.
//!
//! ## Overview
//!
//! - **Movies**: CRUD over the catalogue, with full-text title search,
//!   genre filtering, safe-listed sorting, and paginated responses
//! - **Users**: registration with emailed activation tokens
//! - **Authentication**: opaque database-backed bearer tokens (hashed at
//!   rest, scoped, expiring)
//! - **Optimistic concurrency**: updates are keyed on a row version;
//!   concurrent edits surface as conflicts instead of lost writes
//!
//! ## Architecture
//!
//! The codebase follows a modular layout:
//!
//! ```text
//! src/
//! ├── config/           # Env-loaded configuration (database, email, CORS)
//! ├── middleware/       # Bearer-token auth extractors
//! ├── modules/          # Feature modules
//! │   ├── healthcheck/ # Liveness endpoint
//! │   ├── movies/      # Movie catalogue CRUD and listing
//! │   ├── users/       # Registration and activation
//! │   └── tokens/      # Authentication token issuance
//! ├── utils/            # Errors, pagination, runtime type, mailer
//! └── validator.rs      # Per-request validation accumulator
//! ```
//!
//! Each feature module follows a consistent structure:
//!
//! - `model.rs`: data models, DTOs, validation rules
//! - `service.rs`: store operations
//! - `controller.rs`: HTTP handlers
//! - `router.rs`: axum router configuration
//!
//! ## Security Considerations
//!
//! - Passwords are hashed with bcrypt (cost 12); plaintexts are never
//!   persisted or logged
//! - Token plaintexts are shown to clients once; only SHA-256 hashes are
//!   stored
//! - Sort parameters pass through a per-endpoint safe list before touching
//!   SQL
//! - Movie routes require an authenticated, activated account

pub mod config;
pub mod docs;
pub mod logging;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod utils;
pub mod validator;
