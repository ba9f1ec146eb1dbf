//! Shared database helpers.

use std::future::Future;
use std::time::Duration;

use crate::utils::errors::ModelError;

/// Deadline applied to every row-level store operation.
pub const QUERY_TIMEOUT: Duration = Duration::from_secs(3);

/// Runs a query future under [`QUERY_TIMEOUT`]. Expiry surfaces as
/// [`ModelError::Timeout`]; the abandoned query is not retried.
pub async fn with_timeout<T, F>(fut: F) -> Result<T, ModelError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(QUERY_TIMEOUT, fut).await {
        Ok(result) => result.map_err(ModelError::from),
        Err(_) => Err(ModelError::Timeout),
    }
}
