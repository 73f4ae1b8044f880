//! Query layer: a keyed, de-duplicating cache in front of [`CommitmentsApi`].
//!
//! - [`QueryKey`]: identity of a query (`investors`, `commitments/{id}`)
//! - [`QueryCache`]: per-key data, error, timestamp and in-flight request
//! - [`RetryPolicy`]: automatic retries before an error is surfaced
//! - [`QueryClient`]: the two dashboard queries wired to the API
//!
//! [`CommitmentsApi`]: commitments_api::CommitmentsApi

mod cache;
mod client;
mod key;
mod retry;

use std::sync::Arc;

use commitments_api::ApiError;

pub use cache::QueryCache;
pub use client::QueryClient;
pub use key::QueryKey;
pub use retry::RetryPolicy;

/// A query failure. Shared so every waiter of one request sees the same error.
pub type QueryError = Arc<ApiError>;

/// Result type produced by the query layer.
pub type QueryResult<T> = std::result::Result<T, QueryError>;
