use chrono::{DateTime, Utc};
use commitments_api::{Commitment, Investor, InvestorCommitmentDetails, InvestorId};

use crate::query::{QueryError, QueryResult};

/// Observable state of one query.
#[derive(Clone, Debug)]
pub struct QueryState<T> {
    /// Last successful result. Kept when a later request fails.
    pub data: Option<T>,
    pub error: Option<QueryError>,
    pub is_fetching: bool,
    pub updated_at: Option<DateTime<Utc>>,
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            is_fetching: false,
            updated_at: None,
        }
    }
}

impl<T> QueryState<T> {
    /// A request in flight, optionally showing previously cached data.
    pub(crate) fn fetching(cached: Option<T>) -> Self {
        Self {
            data: cached,
            is_fetching: true,
            ..Self::default()
        }
    }

    /// Fetching with nothing to show yet.
    pub fn is_loading(&self) -> bool {
        self.is_fetching && self.data.is_none()
    }

    pub(crate) fn settle(&mut self, result: QueryResult<T>) {
        self.is_fetching = false;
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
                self.updated_at = Some(Utc::now());
            }
            Err(e) => self.error = Some(e),
        }
    }
}

/// Everything a presenter needs, derived at one point in time.
#[derive(Clone, Debug)]
pub struct DashboardSnapshot {
    /// Investor collection; empty until the first successful load.
    pub investors: Vec<Investor>,
    pub investors_loading: bool,
    pub investors_error: Option<QueryError>,
    pub selected_investor_id: Option<InvestorId>,
    pub selected_asset_class: String,
    /// The selected investor, if the collection still contains it.
    pub current_investor: Option<Investor>,
    pub details: Option<InvestorCommitmentDetails>,
    pub commitments_loading: bool,
    pub commitments_error: Option<QueryError>,
    pub asset_classes: Vec<String>,
    pub filtered_commitments: Vec<Commitment>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use commitments_api::ApiError;
    use std::sync::Arc;

    #[test]
    fn test_loading_only_without_data() {
        assert!(QueryState::<u32>::fetching(None).is_loading());
        assert!(!QueryState::fetching(Some(1)).is_loading());
        assert!(!QueryState::<u32>::default().is_loading());
    }

    #[test]
    fn test_settle_error_keeps_data() {
        let mut state = QueryState::fetching(Some(1));
        state.settle(Err(Arc::new(ApiError::InvalidCommitmentsFormat)));

        assert!(!state.is_fetching);
        assert_eq!(state.data, Some(1));
        assert!(state.error.is_some());
    }

    #[test]
    fn test_settle_success_clears_error() {
        let mut state: QueryState<u32> = QueryState::default();
        state.error = Some(Arc::new(ApiError::InvalidCommitmentsFormat));
        state.is_fetching = true;
        state.settle(Ok(5));

        assert_eq!(state.data, Some(5));
        assert!(state.error.is_none());
        assert!(state.updated_at.is_some());
    }
}
