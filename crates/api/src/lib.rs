//! Investor Commitments API crate
//!
//! Read-only client for the investor commitments service. The service exposes
//! two endpoints:
//!
//! ```text
//! GET {base}/investors                    -> [Investor]
//! GET {base}/investors/{id}/commitments   -> InvestorCommitmentDetails
//! ```
//!
//! # Core Types
//!
//! - [`Investor`] - An investor with its aggregate commitment
//! - [`Commitment`] - A single allocation to an asset class
//! - [`InvestorCommitmentDetails`] - Per-investor breakdown of commitments
//! - [`CommitmentsApi`] - The seam consumed by the dashboard query layer
//! - [`HttpCommitmentsClient`] - reqwest-backed implementation
//! - [`ApiError`] - Transport, HTTP status and response shape failures

pub mod client;
pub mod errors;
pub mod models;

pub use client::{validate_commitments_shape, CommitmentsApi, HttpCommitmentsClient};
pub use errors::{ApiError, Result};
pub use models::{Commitment, Investor, InvestorCommitmentDetails, InvestorId};
pub use reqwest::StatusCode;
