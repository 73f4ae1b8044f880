//! Error types for the commitments API client.
//!
//! Three failure classes are distinguished:
//! - transport failures, where no response was received
//! - HTTP failures, where the service answered with a non-success status
//! - shape failures, where the body parsed but broke the response contract

use reqwest::StatusCode;
use thiserror::Error;

use crate::models::InvestorId;

/// Type alias for Result using [`ApiError`].
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors that can occur while talking to the commitments service.
#[derive(Error, Debug)]
pub enum ApiError {
    /// No response was received. The underlying message is kept verbatim.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// `GET /investors` answered with a non-success status.
    #[error("Failed to fetch investors")]
    InvestorsUnavailable {
        /// The status returned by the service
        status: StatusCode,
    },

    /// `GET /investors/{id}/commitments` answered with a non-success status.
    #[error("Failed to fetch commitments for investor {investor_id}")]
    CommitmentsUnavailable {
        /// The investor whose commitments were requested
        investor_id: InvestorId,
        /// The status returned by the service
        status: StatusCode,
    },

    /// The commitments body parsed as JSON but `commitments` was missing or
    /// not an array.
    #[error("Invalid response format from commitments endpoint")]
    InvalidCommitmentsFormat,

    /// The body of a successful response could not be decoded.
    #[error("Failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The HTTP client could not be built.
    #[error("Failed to initialize HTTP client: {0}")]
    Client(String),
}

impl ApiError {
    /// The HTTP status that caused this error, if a response was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::InvestorsUnavailable { status } | Self::CommitmentsUnavailable { status, .. } => {
                Some(*status)
            }
            Self::Transport(e) => e.status(),
            Self::InvalidCommitmentsFormat | Self::Decode(_) | Self::Client(_) => None,
        }
    }
}
