//! Retry policy applied to every query before its error reaches the view.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use commitments_api::ApiError;
use log::warn;

use super::{QueryKey, QueryResult};

/// Default number of automatic retries for a failed query.
const DEFAULT_RETRIES: u32 = 1;

/// Default delay before the first retry. Doubles for each further attempt.
const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);

/// Upper bound on the delay between two attempts.
const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(30);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RetryPolicy {
    /// Extra attempts after the first failure.
    pub retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: DEFAULT_RETRIES,
            base_delay: DEFAULT_BASE_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
        }
    }
}

impl RetryPolicy {
    /// A policy that surfaces the first error.
    pub fn none() -> Self {
        Self {
            retries: 0,
            ..Self::default()
        }
    }

    /// Delay before retry number `attempt` (1-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay
            .checked_mul(factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }

    /// Runs `op` until it succeeds or the retries are used up.
    pub async fn run<T, F, Fut>(&self, key: QueryKey, mut op: F) -> QueryResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let mut attempt = 0;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < self.retries => {
                    attempt += 1;
                    let delay = self.delay_for(attempt);
                    warn!(
                        "Query '{}' failed ({}), retry {}/{} in {:?}",
                        key, e, attempt, self.retries, delay
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(Arc::new(e)),
            }
        }
    }
}
