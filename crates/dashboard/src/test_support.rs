//! Hand-written [`CommitmentsApi`] mock shared by the unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use commitments_api::{
    ApiError, Commitment, CommitmentsApi, Investor, InvestorCommitmentDetails, InvestorId,
    Result, StatusCode,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tokio::sync::oneshot;

use crate::query::RetryPolicy;

pub(crate) fn fast_retry(retries: u32) -> RetryPolicy {
    RetryPolicy {
        retries,
        base_delay: Duration::ZERO,
        max_delay: Duration::ZERO,
    }
}

pub(crate) fn commitment(asset_class: &str, amount: Decimal) -> Commitment {
    Commitment {
        asset_class: asset_class.to_string(),
        amount,
        currency: "GBP".to_string(),
    }
}

pub(crate) struct MockApi {
    investors: Mutex<Vec<Investor>>,
    details: Mutex<HashMap<InvestorId, InvestorCommitmentDetails>>,
    /// Investor fetches that fail before one succeeds.
    investor_failures: AtomicU32,
    investors_always_fail: AtomicBool,
    investor_calls: AtomicU32,
    commitment_calls: Mutex<Vec<InvestorId>>,
    /// Commitment fetches that wait for a signal before answering.
    gates: Mutex<HashMap<InvestorId, oneshot::Receiver<()>>>,
    investors_gate: Mutex<Option<oneshot::Receiver<()>>>,
}

impl MockApi {
    pub(crate) fn new(
        investors: Vec<Investor>,
        details: HashMap<InvestorId, InvestorCommitmentDetails>,
    ) -> Self {
        Self {
            investors: Mutex::new(investors),
            details: Mutex::new(details),
            investor_failures: AtomicU32::new(0),
            investors_always_fail: AtomicBool::new(false),
            investor_calls: AtomicU32::new(0),
            commitment_calls: Mutex::new(Vec::new()),
            gates: Mutex::new(HashMap::new()),
            investors_gate: Mutex::new(None),
        }
    }

    /// Two investors: 1 holds Private Equity and Natural Resources, 2 holds
    /// Hedge Funds only.
    pub(crate) fn sample() -> Self {
        let investors = vec![
            Investor {
                id: 1,
                name: "Mjd Jedi fund".to_string(),
                total_commitment: dec!(800000),
            },
            Investor {
                id: 2,
                name: "Ioo Gryffindor fund".to_string(),
                total_commitment: dec!(2000000),
            },
        ];
        let mut details = HashMap::new();
        details.insert(
            1,
            InvestorCommitmentDetails {
                investor: "Mjd Jedi fund".to_string(),
                total_commitment: dec!(800000),
                commitments: vec![
                    commitment("Private Equity", dec!(500000)),
                    commitment("Natural Resources", dec!(300000)),
                ],
            },
        );
        details.insert(
            2,
            InvestorCommitmentDetails {
                investor: "Ioo Gryffindor fund".to_string(),
                total_commitment: dec!(2000000),
                commitments: vec![commitment("Hedge Funds", dec!(2000000))],
            },
        );
        Self::new(investors, details)
    }

    pub(crate) fn fail_investors_times(&self, times: u32) {
        self.investor_failures.store(times, Ordering::SeqCst);
    }

    pub(crate) fn fail_investors_always(&self) {
        self.investors_always_fail.store(true, Ordering::SeqCst);
    }

    pub(crate) fn set_investors(&self, investors: Vec<Investor>) {
        *self.investors.lock().unwrap() = investors;
    }

    pub(crate) fn set_details(
        &self,
        investor_id: InvestorId,
        details: InvestorCommitmentDetails,
    ) {
        self.details.lock().unwrap().insert(investor_id, details);
    }

    /// Holds the next investors answer until the returned sender fires. The
    /// answer is the collection as it was when the request arrived.
    pub(crate) fn gate_investors(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.investors_gate.lock().unwrap() = Some(rx);
        tx
    }

    /// Holds the next commitments answer for `investor_id` until the returned
    /// sender fires. The answer is the one on record when the request arrived.
    pub(crate) fn gate(&self, investor_id: InvestorId) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(investor_id, rx);
        tx
    }

    pub(crate) fn investor_calls(&self) -> u32 {
        self.investor_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn commitment_calls(&self) -> Vec<InvestorId> {
        self.commitment_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommitmentsApi for MockApi {
    async fn fetch_investors(&self) -> Result<Vec<Investor>> {
        self.investor_calls.fetch_add(1, Ordering::SeqCst);
        let failing = self.investors_always_fail.load(Ordering::SeqCst)
            || self
                .investor_failures
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok();
        let answer = if failing {
            Err(ApiError::InvestorsUnavailable {
                status: StatusCode::SERVICE_UNAVAILABLE,
            })
        } else {
            Ok(self.investors.lock().unwrap().clone())
        };
        let gate = self.investors_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        answer
    }

    async fn fetch_investor_commitments(
        &self,
        investor_id: InvestorId,
    ) -> Result<InvestorCommitmentDetails> {
        self.commitment_calls.lock().unwrap().push(investor_id);
        let answer = self
            .details
            .lock()
            .unwrap()
            .get(&investor_id)
            .cloned()
            .ok_or(ApiError::CommitmentsUnavailable {
                investor_id,
                status: StatusCode::NOT_FOUND,
            });
        let gate = self.gates.lock().unwrap().remove(&investor_id);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        answer
    }
}
