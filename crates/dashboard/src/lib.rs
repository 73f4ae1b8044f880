//! Investor Commitments Dashboard
//!
//! Binds the commitments API to view state. Nothing in this crate renders;
//! it produces snapshots and view models that a presenter turns into output.
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+     +---------------------+
//! |  CommitmentsApi  | --> |   QueryClient    | --> | DashboardController |
//! +------------------+     | (keyed cache,    |     | (selection, derived |
//!                          |  retry, dedup)   |     |  state, events)     |
//!                          +------------------+     +---------------------+
//!                                                            |
//!                                                            v
//!                                                   +------------------+
//!                                                   |  DashboardView   |
//!                                                   +------------------+
//! ```

pub mod config;
pub mod dashboard;
pub mod errors;
pub mod query;
pub mod view;

pub use config::DashboardConfig;
pub use dashboard::{
    DashboardController, DashboardEvent, DashboardSnapshot, QueryState, ALL_ASSET_CLASSES,
};
pub use errors::{Error, Result};
pub use query::{QueryCache, QueryClient, QueryError, QueryKey, QueryResult, RetryPolicy};
pub use view::DashboardView;

#[cfg(test)]
mod test_support;
