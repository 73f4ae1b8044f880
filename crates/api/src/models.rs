//! Wire and domain models for investors and their commitments.
//!
//! The service speaks camelCase JSON; amounts are plain JSON numbers in whole
//! currency units and are held as [`Decimal`] on this side.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identifier assigned to an investor by the remote service.
pub type InvestorId = i64;

/// Investor summary as returned by `GET /investors`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investor {
    pub id: InvestorId,
    pub name: String,
    pub total_commitment: Decimal,
}

/// A single allocation of capital to one asset class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commitment {
    pub asset_class: String,
    pub amount: Decimal,
    pub currency: String,
}

/// Commitment breakdown for one investor, as returned by
/// `GET /investors/{id}/commitments`.
///
/// `investor` carries the display name and is sourced independently of
/// [`Investor::name`]. The order of `commitments` is display order only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestorCommitmentDetails {
    pub investor: String,
    pub total_commitment: Decimal,
    pub commitments: Vec<Commitment>,
}
