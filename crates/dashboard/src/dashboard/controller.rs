//! The dashboard view-state controller.
//!
//! Owns the selection and the observable state of both queries. All mutation
//! happens through the methods below; every change is announced on the
//! [`EventBus`] and presenters re-read [`DashboardController::snapshot`].

use std::sync::{Arc, Mutex, MutexGuard};

use commitments_api::{CommitmentsApi, Investor, InvestorCommitmentDetails, InvestorId};
use log::{debug, info, warn};
use tokio::sync::broadcast;

use super::derive::{asset_classes, filter_commitments, find_investor};
use super::events::{DashboardEvent, EventBus};
use super::state::{DashboardSnapshot, QueryState};
use super::ALL_ASSET_CLASSES;
use crate::config::DashboardConfig;
use crate::query::QueryClient;

struct ViewState {
    selected_investor_id: Option<InvestorId>,
    selected_asset_class: String,
    investors: QueryState<Vec<Investor>>,
    /// Always describes `selected_investor_id`.
    commitments: QueryState<InvestorCommitmentDetails>,
    /// Bumped by every investors load; only the latest load may settle.
    investors_generation: u64,
    /// Bumped by every commitments load, including on selection change.
    commitments_generation: u64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            selected_investor_id: None,
            selected_asset_class: ALL_ASSET_CLASSES.to_string(),
            investors: QueryState::default(),
            commitments: QueryState::default(),
            investors_generation: 0,
            commitments_generation: 0,
        }
    }
}

impl ViewState {
    fn begin_investors(&mut self) -> u64 {
        self.investors_generation += 1;
        self.investors.is_fetching = true;
        self.investors_generation
    }

    fn begin_commitments(&mut self) -> u64 {
        self.commitments_generation += 1;
        self.commitments.is_fetching = true;
        self.commitments_generation
    }
}

pub struct DashboardController {
    queries: QueryClient,
    refetch_on_focus: bool,
    state: Mutex<ViewState>,
    events: EventBus,
}

impl DashboardController {
    pub fn new(queries: QueryClient) -> Self {
        Self {
            queries,
            refetch_on_focus: false,
            state: Mutex::new(ViewState::default()),
            events: EventBus::default(),
        }
    }

    pub fn from_config(api: Arc<dyn CommitmentsApi>, config: &DashboardConfig) -> Self {
        Self::new(QueryClient::from_config(api, config))
            .with_refetch_on_focus(config.refetch_on_focus)
    }

    pub fn with_refetch_on_focus(mut self, enabled: bool) -> Self {
        self.refetch_on_focus = enabled;
        self
    }

    pub fn queries(&self) -> &QueryClient {
        &self.queries
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DashboardEvent> {
        self.events.subscribe()
    }

    fn lock_state(&self) -> MutexGuard<'_, ViewState> {
        self.state.lock().unwrap_or_else(|poisoned| {
            warn!("Dashboard state mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Applies `change` under the lock, then announces `event`.
    fn update<F, R>(&self, event: DashboardEvent, change: F) -> R
    where
        F: FnOnce(&mut ViewState) -> R,
    {
        let outcome = change(&mut self.lock_state());
        self.events.publish(event);
        outcome
    }

    /// Loads the investor collection. Called once when the view appears.
    pub async fn mount(&self) {
        self.load_investors().await;
    }

    /// Drops the cached collection and loads it again. A selected investor
    /// that disappears from the new collection stays selected but no longer
    /// resolves to a current investor.
    pub async fn refresh_investors(&self) {
        self.queries.invalidate_investors();
        self.load_investors().await;
    }

    /// Runs the investor query. A load overtaken by a later one leaves the
    /// state to that later load.
    async fn load_investors(&self) {
        let generation = self.update(DashboardEvent::InvestorsChanged, ViewState::begin_investors);

        let result = self.queries.investors().await;

        let applied = {
            let mut state = self.lock_state();
            if state.investors_generation == generation {
                match &result {
                    Ok(investors) => info!("Loaded {} investors", investors.len()),
                    Err(e) => warn!("Failed to load investors: {}", e),
                }
                state.investors.settle(result);
                true
            } else {
                false
            }
        };

        if applied {
            self.events.publish(DashboardEvent::InvestorsChanged);
        } else {
            debug!("Discarding superseded investors response");
        }
    }

    /// Selects an investor and loads its commitments.
    ///
    /// The asset class filter is left untouched. If another investor is
    /// selected before this load finishes, its result is discarded.
    pub async fn select_investor(&self, investor_id: InvestorId) {
        let cached = self.queries.cached_commitments(investor_id);
        let generation = self.update(DashboardEvent::SelectionChanged, |state| {
            state.selected_investor_id = Some(investor_id);
            state.commitments = QueryState::fetching(cached);
            state.begin_commitments()
        });

        self.load_commitments(investor_id, generation).await;
    }

    /// Settles the commitments state with the result for `investor_id`,
    /// unless a newer load began since `generation` was issued.
    async fn load_commitments(&self, investor_id: InvestorId, generation: u64) {
        let result = self.queries.investor_commitments(investor_id).await;

        let applied = {
            let mut state = self.lock_state();
            if state.commitments_generation == generation {
                if let Err(e) = &result {
                    warn!(
                        "Failed to load commitments for investor {}: {}",
                        investor_id, e
                    );
                }
                state.commitments.settle(result);
                true
            } else {
                false
            }
        };

        if applied {
            self.events.publish(DashboardEvent::CommitmentsChanged);
        } else {
            debug!(
                "Discarding superseded commitments for investor {}",
                investor_id
            );
        }
    }

    /// Sets the asset class filter. The label is not checked against the
    /// classes on offer.
    pub fn select_asset_class(&self, asset_class: impl Into<String>) {
        let asset_class = asset_class.into();
        self.update(DashboardEvent::SelectionChanged, |state| {
            state.selected_asset_class = asset_class;
        });
    }

    /// Refetches the active queries when focus refetching is enabled.
    ///
    /// Commitments are refetched only if the investor selected at focus time
    /// is still selected once the investor collection has reloaded.
    pub async fn window_focused(&self) {
        if !self.refetch_on_focus {
            return;
        }

        let selected = self.lock_state().selected_investor_id;
        debug!("View focused, refetching active queries");
        self.queries.invalidate_investors();
        self.load_investors().await;

        let Some(investor_id) = selected else {
            return;
        };
        let generation = {
            let mut state = self.lock_state();
            if state.selected_investor_id != Some(investor_id) {
                debug!(
                    "Selection moved on from investor {}, skipping commitments refetch",
                    investor_id
                );
                return;
            }
            state.begin_commitments()
        };
        self.events.publish(DashboardEvent::CommitmentsChanged);

        self.queries.invalidate_commitments(investor_id);
        self.load_commitments(investor_id, generation).await;
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        let state = self.lock_state();
        let investors = state.investors.data.clone().unwrap_or_default();
        let current_investor = find_investor(&investors, state.selected_investor_id).cloned();
        let details = state.commitments.data.as_ref();

        DashboardSnapshot {
            investors_loading: state.investors.is_loading(),
            investors_error: state.investors.error.clone(),
            selected_investor_id: state.selected_investor_id,
            selected_asset_class: state.selected_asset_class.clone(),
            current_investor,
            asset_classes: asset_classes(details),
            filtered_commitments: filter_commitments(
                state.selected_investor_id,
                details,
                &state.selected_asset_class,
            ),
            details: details.cloned(),
            commitments_loading: state.commitments.is_loading(),
            commitments_error: state.commitments.error.clone(),
            investors,
        }
    }
}
