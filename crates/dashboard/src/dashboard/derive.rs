//! Pure derivations from fetched data plus selection.

use std::collections::HashSet;

use commitments_api::{Commitment, Investor, InvestorCommitmentDetails, InvestorId};

use super::ALL_ASSET_CLASSES;

/// `["All"]` followed by each distinct asset class in first-seen order.
pub fn asset_classes(details: Option<&InvestorCommitmentDetails>) -> Vec<String> {
    let mut classes = vec![ALL_ASSET_CLASSES.to_string()];
    let Some(details) = details else {
        return classes;
    };

    let mut seen = HashSet::new();
    for commitment in &details.commitments {
        if seen.insert(commitment.asset_class.as_str()) {
            classes.push(commitment.asset_class.clone());
        }
    }
    classes
}

/// Commitments shown for the current selection.
///
/// Empty without a selected investor or loaded details. With
/// [`ALL_ASSET_CLASSES`] every commitment is kept, otherwise only those whose
/// asset class matches exactly (case-sensitive).
pub fn filter_commitments(
    selected_investor_id: Option<InvestorId>,
    details: Option<&InvestorCommitmentDetails>,
    asset_class: &str,
) -> Vec<Commitment> {
    match (selected_investor_id, details) {
        (Some(_), Some(details)) => details
            .commitments
            .iter()
            .filter(|c| asset_class == ALL_ASSET_CLASSES || c.asset_class == asset_class)
            .cloned()
            .collect(),
        _ => Vec::new(),
    }
}

pub fn find_investor(investors: &[Investor], investor_id: Option<InvestorId>) -> Option<&Investor> {
    let investor_id = investor_id?;
    investors.iter().find(|i| i.id == investor_id)
}
