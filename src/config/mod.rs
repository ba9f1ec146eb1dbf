//! Configuration modules for the Reelbase API.
//!
//! Each submodule handles one aspect of configuration, loaded from
//! environment variables (a `.env` file is picked up by `dotenvy` at
//! startup).
//!
//! - [`cors`]: allowed CORS origins
//! - [`database`]: PostgreSQL connection pool initialization
//! - [`email`]: SMTP settings for outbound mail

pub mod cors;
pub mod database;
pub mod email;
