//! View state: selection, query states and everything derived from them.

mod controller;
mod derive;
mod events;
mod state;

pub use controller::DashboardController;
pub use derive::{asset_classes, filter_commitments, find_investor};
pub use events::{DashboardEvent, EventBus};
pub use state::{DashboardSnapshot, QueryState};

/// Asset class filter that matches every commitment.
pub const ALL_ASSET_CLASSES: &str = "All";
