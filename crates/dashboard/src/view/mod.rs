//! Presentation view models.
//!
//! Renderers receive plain data: which panel to show, which rows, which
//! labels. Formatting of amounts and percentages happens here so every
//! renderer shows the same figures.

mod format;
mod models;

pub use format::{currency_symbol, format_millions, format_percentage, percentage_of_total};
pub use models::{
    CommitmentBody, CommitmentRow, CommitmentTableView, DashboardView, DetailPanel, FilterBarView,
    FilterToggle, InvestorCard, InvestorListView, COMMITMENTS_FAILED_MESSAGE,
    INVESTORS_FAILED_MESSAGE, SELECT_INVESTOR_MESSAGE,
};
