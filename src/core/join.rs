//! Join strategies over independent asynchronous operations.
//!
//! None of these cancel siblings: every operation runs until it completes or its
//! own timeout fires, even when another one has already failed.

use std::future::Future;

use futures::future::join_all;
use tracing::warn;

/// Wait for every operation; fail if any failed.
///
/// Returns all values in input order, or the first error in input order.
pub async fn join_all_or_fail<I, F, T, E>(operations: I) -> Result<Vec<T>, E>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T, E>>,
{
    join_all(operations).await.into_iter().collect()
}

/// Wait for every operation and hand back each outcome.
pub async fn settle_all<I, F, T, E>(operations: I) -> Vec<Result<T, E>>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T, E>>,
{
    join_all(operations).await
}

/// Await one operation, substituting `fallback(&err)` when it fails.
pub async fn settle_or_else<F, T, E, D>(operation: F, fallback: D) -> T
where
    F: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
    D: FnOnce(&E) -> T,
{
    match operation.await {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "operation failed, substituting default");
            fallback(&e)
        }
    }
}
