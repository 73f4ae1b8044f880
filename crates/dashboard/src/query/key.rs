use std::fmt;

use commitments_api::InvestorId;

/// Identity of a cached query.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum QueryKey {
    /// The investor collection.
    Investors,
    /// The commitment breakdown of one investor.
    Commitments(InvestorId),
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Investors => write!(f, "investors"),
            Self::Commitments(id) => write!(f, "commitments/{}", id),
        }
    }
}
