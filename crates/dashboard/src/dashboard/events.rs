use tokio::sync::broadcast;

const DEFAULT_CAPACITY: usize = 64;

/// Change notifications. Subscribers re-read
/// [`DashboardController::snapshot`](super::DashboardController::snapshot).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DashboardEvent {
    /// Investor collection started or finished loading.
    InvestorsChanged,
    /// Selected investor or asset class changed.
    SelectionChanged,
    /// Commitments for the selected investor finished loading.
    CommitmentsChanged,
}

/// Broadcast bus that fans dashboard events out to every subscriber.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<DashboardEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _receiver) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DashboardEvent> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: DashboardEvent) {
        // No subscribers is fine; lagging ones catch up from the snapshot.
        let _ = self.sender.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
