//! The two dashboard queries, bound to the API through the cache and the
//! retry policy.

use std::sync::Arc;
use std::time::Duration;

use commitments_api::{CommitmentsApi, Investor, InvestorCommitmentDetails, InvestorId};

use super::{QueryCache, QueryKey, QueryResult, RetryPolicy};
use crate::config::DashboardConfig;

pub struct QueryClient {
    api: Arc<dyn CommitmentsApi>,
    retry: RetryPolicy,
    investors: QueryCache<Vec<Investor>>,
    commitments: QueryCache<InvestorCommitmentDetails>,
}

impl QueryClient {
    pub fn new(api: Arc<dyn CommitmentsApi>, retry: RetryPolicy, stale_time: Duration) -> Self {
        Self {
            api,
            retry,
            investors: QueryCache::new(stale_time),
            commitments: QueryCache::new(stale_time),
        }
    }

    pub fn from_config(api: Arc<dyn CommitmentsApi>, config: &DashboardConfig) -> Self {
        Self::new(api, config.retry, config.stale_time)
    }

    /// The investor collection, keyed [`QueryKey::Investors`].
    pub async fn investors(&self) -> QueryResult<Vec<Investor>> {
        let key = QueryKey::Investors;
        let api = self.api.clone();
        let retry = self.retry;
        self.investors
            .fetch(key, move || async move {
                retry.run(key, || api.fetch_investors()).await
            })
            .await
    }

    /// One investor's commitments, keyed [`QueryKey::Commitments`].
    pub async fn investor_commitments(
        &self,
        investor_id: InvestorId,
    ) -> QueryResult<InvestorCommitmentDetails> {
        let key = QueryKey::Commitments(investor_id);
        let api = self.api.clone();
        let retry = self.retry;
        self.commitments
            .fetch(key, move || async move {
                retry
                    .run(key, || api.fetch_investor_commitments(investor_id))
                    .await
            })
            .await
    }

    pub fn cached_investors(&self) -> Option<Vec<Investor>> {
        self.investors.cached(QueryKey::Investors)
    }

    pub fn cached_commitments(&self, investor_id: InvestorId) -> Option<InvestorCommitmentDetails> {
        self.commitments.cached(QueryKey::Commitments(investor_id))
    }

    pub fn invalidate_investors(&self) {
        self.investors.invalidate(QueryKey::Investors);
    }

    pub fn invalidate_commitments(&self, investor_id: InvestorId) {
        self.commitments.invalidate(QueryKey::Commitments(investor_id));
    }

    pub fn invalidate_all(&self) {
        self.investors.invalidate_all();
        self.commitments.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fast_retry, MockApi};

    fn client(api: &Arc<MockApi>, retries: u32) -> QueryClient {
        QueryClient::new(api.clone(), fast_retry(retries), Duration::from_secs(60))
    }

    #[tokio::test]
    async fn test_investors_are_memoized() {
        let api = Arc::new(MockApi::sample());
        let queries = client(&api, 1);

        let first = queries.investors().await.unwrap();
        let second = queries.investors().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(api.investor_calls(), 1);
    }

    #[tokio::test]
    async fn test_failed_query_is_retried_once() {
        let api = Arc::new(MockApi::sample());
        api.fail_investors_times(1);
        let queries = client(&api, 1);

        let investors = queries.investors().await.unwrap();

        assert_eq!(investors.len(), 2);
        assert_eq!(api.investor_calls(), 2);
    }

    #[tokio::test]
    async fn test_error_surfaces_after_retries() {
        let api = Arc::new(MockApi::sample());
        api.fail_investors_times(2);
        let queries = client(&api, 1);

        let error = queries.investors().await.unwrap_err();

        assert_eq!(error.to_string(), "Failed to fetch investors");
        assert_eq!(api.investor_calls(), 2);
    }

    #[tokio::test]
    async fn test_commitments_keyed_by_investor() {
        let api = Arc::new(MockApi::sample());
        let queries = client(&api, 0);

        queries.investor_commitments(1).await.unwrap();
        queries.investor_commitments(2).await.unwrap();
        queries.investor_commitments(1).await.unwrap();

        assert_eq!(api.commitment_calls(), vec![1, 2]);
        assert_eq!(queries.cached_commitments(2).unwrap().investor, "Ioo Gryffindor fund");
    }

    #[tokio::test]
    async fn test_invalidate_refetches() {
        let api = Arc::new(MockApi::sample());
        let queries = client(&api, 0);

        queries.investor_commitments(1).await.unwrap();
        queries.invalidate_commitments(1);
        queries.investor_commitments(1).await.unwrap();

        assert_eq!(api.commitment_calls(), vec![1, 1]);
    }
}
