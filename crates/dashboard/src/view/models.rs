//! View models for the three presentation components and the page around
//! them.

use commitments_api::{Commitment, Investor, InvestorId};
use rust_decimal::Decimal;

use super::format::{format_millions, format_percentage, percentage_of_total};
use crate::dashboard::DashboardSnapshot;

pub const INVESTORS_FAILED_MESSAGE: &str = "Failed to load investors. Please try again later.";
pub const COMMITMENTS_FAILED_MESSAGE: &str = "Failed to load commitments. Please try again later.";
pub const SELECT_INVESTOR_MESSAGE: &str = "Select an investor to view commitment details";

/// Investor totals carry no currency; the service reports them in pounds.
const INVESTOR_TOTAL_CURRENCY: &str = "GBP";

#[derive(Clone, Debug, PartialEq)]
pub struct InvestorCard {
    pub id: InvestorId,
    pub name: String,
    pub total_label: String,
    pub is_selected: bool,
}

impl InvestorCard {
    pub fn new(investor: &Investor, selected: Option<InvestorId>) -> Self {
        Self {
            id: investor.id,
            name: investor.name.clone(),
            total_label: format!(
                "Total Commitment: {}",
                format_millions(investor.total_commitment, INVESTOR_TOTAL_CURRENCY)
            ),
            is_selected: selected == Some(investor.id),
        }
    }
}

/// Sidebar listing every investor.
#[derive(Clone, Debug, PartialEq)]
pub enum InvestorListView {
    Loading,
    Loaded(Vec<InvestorCard>),
}

impl InvestorListView {
    pub fn new(investors: &[Investor], selected: Option<InvestorId>, is_loading: bool) -> Self {
        if is_loading {
            return Self::Loading;
        }
        Self::Loaded(
            investors
                .iter()
                .map(|investor| InvestorCard::new(investor, selected))
                .collect(),
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FilterToggle {
    pub label: String,
    pub active: bool,
}

/// One toggle per asset class; the one matching the selection is active.
#[derive(Clone, Debug, PartialEq)]
pub struct FilterBarView {
    pub toggles: Vec<FilterToggle>,
}

impl FilterBarView {
    pub fn new(asset_classes: &[String], selected: &str) -> Self {
        Self {
            toggles: asset_classes
                .iter()
                .map(|label| FilterToggle {
                    label: label.clone(),
                    active: label == selected,
                })
                .collect(),
        }
    }

    pub fn active(&self) -> Option<&str> {
        self.toggles
            .iter()
            .find(|t| t.active)
            .map(|t| t.label.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CommitmentRow {
    pub asset_class: String,
    pub amount_label: String,
    pub currency: String,
    pub percentage_label: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CommitmentTableView {
    pub rows: Vec<CommitmentRow>,
}

impl CommitmentTableView {
    /// Builds one row per commitment. Percentages are taken against `total`,
    /// which callers pass unfiltered.
    pub fn new(commitments: &[Commitment], total: Decimal) -> Self {
        Self {
            rows: commitments
                .iter()
                .map(|c| CommitmentRow {
                    asset_class: c.asset_class.clone(),
                    amount_label: format_millions(c.amount, &c.currency),
                    currency: c.currency.clone(),
                    percentage_label: format_percentage(percentage_of_total(c.amount, total)),
                })
                .collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum CommitmentBody {
    Loading,
    Failed { message: &'static str },
    Table(CommitmentTableView),
}

#[derive(Clone, Debug, PartialEq)]
pub enum DetailPanel {
    Placeholder { message: &'static str },
    Investor {
        heading: String,
        filters: FilterBarView,
        body: CommitmentBody,
    },
}

/// The whole page.
#[derive(Clone, Debug, PartialEq)]
pub enum DashboardView {
    /// The investor collection failed; nothing else can be shown.
    InvestorsFailed { message: &'static str },
    Ready {
        investors: InvestorListView,
        detail: DetailPanel,
    },
}

impl DashboardView {
    pub fn from_snapshot(snapshot: &DashboardSnapshot) -> Self {
        if snapshot.investors_error.is_some() {
            return Self::InvestorsFailed {
                message: INVESTORS_FAILED_MESSAGE,
            };
        }

        let investors = InvestorListView::new(
            &snapshot.investors,
            snapshot.selected_investor_id,
            snapshot.investors_loading,
        );

        let detail = match (&snapshot.selected_investor_id, &snapshot.current_investor) {
            (Some(_), Some(investor)) => DetailPanel::Investor {
                heading: format!("{} Commitments", investor.name),
                filters: FilterBarView::new(
                    &snapshot.asset_classes,
                    &snapshot.selected_asset_class,
                ),
                body: Self::commitment_body(snapshot),
            },
            _ => DetailPanel::Placeholder {
                message: SELECT_INVESTOR_MESSAGE,
            },
        };

        Self::Ready { investors, detail }
    }

    fn commitment_body(snapshot: &DashboardSnapshot) -> CommitmentBody {
        if snapshot.commitments_loading {
            return CommitmentBody::Loading;
        }
        if snapshot.commitments_error.is_some() {
            return CommitmentBody::Failed {
                message: COMMITMENTS_FAILED_MESSAGE,
            };
        }
        let total = snapshot
            .details
            .as_ref()
            .map(|d| d.total_commitment)
            .unwrap_or(Decimal::ZERO);
        CommitmentBody::Table(CommitmentTableView::new(
            &snapshot.filtered_commitments,
            total,
        ))
    }
}
