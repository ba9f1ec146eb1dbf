//! Middleware and extractors for cross-cutting request concerns.
//!
//! - [`auth`]: bearer-token authentication extractors

pub mod auth;
