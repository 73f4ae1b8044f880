//! Plain-text rendering of [`DashboardView`].

use std::fmt::Write;

use commitments_dashboard::view::{
    CommitmentBody, CommitmentTableView, DashboardView, DetailPanel, FilterBarView,
    InvestorListView,
};

pub const HELP: &str = "\
Commands:
  select <id>        show commitments for an investor
  filter <class>     filter by asset class (All for everything)
  refresh            reload the investor list
  focus              simulate the window regaining focus
  help               show this message
  quit               exit";

const RULE: &str = "------------------------------------------------------------";

pub fn render(view: &DashboardView) -> String {
    let mut out = String::new();
    match view {
        DashboardView::InvestorsFailed { message } => {
            let _ = writeln!(out, "{}", message);
        }
        DashboardView::Ready { investors, detail } => {
            render_investors(&mut out, investors);
            let _ = writeln!(out, "{}", RULE);
            render_detail(&mut out, detail);
        }
    }
    out
}

fn render_investors(out: &mut String, investors: &InvestorListView) {
    let _ = writeln!(out, "Investors");
    match investors {
        InvestorListView::Loading => {
            let _ = writeln!(out, "  Loading...");
        }
        InvestorListView::Loaded(cards) => {
            for card in cards {
                let marker = if card.is_selected { '>' } else { ' ' };
                let _ = writeln!(
                    out,
                    "{} [{}] {}  {}",
                    marker, card.id, card.name, card.total_label
                );
            }
        }
    }
}

fn render_detail(out: &mut String, detail: &DetailPanel) {
    match detail {
        DetailPanel::Placeholder { message } => {
            let _ = writeln!(out, "{}", message);
        }
        DetailPanel::Investor {
            heading,
            filters,
            body,
        } => {
            let _ = writeln!(out, "{}", heading);
            render_filters(out, filters);
            match body {
                CommitmentBody::Loading => {
                    let _ = writeln!(out, "Loading...");
                }
                CommitmentBody::Failed { message } => {
                    let _ = writeln!(out, "{}", message);
                }
                CommitmentBody::Table(table) => render_table(out, table),
            }
        }
    }
}

fn render_filters(out: &mut String, filters: &FilterBarView) {
    let labels: Vec<String> = filters
        .toggles
        .iter()
        .map(|t| {
            if t.active {
                format!("[{}]", t.label)
            } else {
                t.label.clone()
            }
        })
        .collect();
    let _ = writeln!(out, "{}", labels.join("  "));
}

fn render_table(out: &mut String, table: &CommitmentTableView) {
    let _ = writeln!(
        out,
        "{:<24} {:>10} {:>8} {:>8}",
        "Asset Class", "Amount", "Currency", "% Total"
    );
    for row in &table.rows {
        let _ = writeln!(
            out,
            "{:<24} {:>10} {:>8} {:>8}",
            row.asset_class, row.amount_label, row.currency, row.percentage_label
        );
    }
}
