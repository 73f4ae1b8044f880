//! HTTP client for the investor commitments service.
//!
//! The dashboard depends on the [`CommitmentsApi`] trait rather than on the
//! concrete client so the query layer can be exercised without a network.
//! The client itself performs no caching and no retries; both belong to the
//! caller.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use serde_json::Value;

use crate::errors::{ApiError, Result};
use crate::models::{Investor, InvestorCommitmentDetails, InvestorId};

/// Default timeout for API requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Read operations offered by the commitments service.
#[async_trait]
pub trait CommitmentsApi: Send + Sync {
    /// Fetch every investor. An empty list is a valid answer.
    async fn fetch_investors(&self) -> Result<Vec<Investor>>;

    /// Fetch the commitment breakdown for one investor.
    ///
    /// The id is not checked locally; an unknown investor surfaces as the
    /// service's non-success status.
    async fn fetch_investor_commitments(
        &self,
        investor_id: InvestorId,
    ) -> Result<InvestorCommitmentDetails>;
}

/// Checks the structural contract of a commitments response body.
///
/// The body must be an object whose `commitments` field is an array (an empty
/// array is fine). Anything else, including a `null` body, is rejected with
/// [`ApiError::InvalidCommitmentsFormat`].
pub fn validate_commitments_shape(body: &Value) -> Result<()> {
    match body.get("commitments") {
        Some(Value::Array(_)) => Ok(()),
        _ => Err(ApiError::InvalidCommitmentsFormat),
    }
}

/// reqwest-backed [`CommitmentsApi`] implementation.
///
/// # Example
///
/// ```ignore
/// let client = HttpCommitmentsClient::new("http://localhost:8000")?;
/// let investors = client.fetch_investors().await?;
/// ```
#[derive(Debug, Clone)]
pub struct HttpCommitmentsClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCommitmentsClient {
    /// Create a client with the default request timeout.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Client`] if the underlying HTTP client cannot be
    /// initialized.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The normalized base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Issue a GET request. Only transport failures are reported here; the
    /// status is left to the caller since each endpoint words it differently.
    async fn get(&self, path: &str) -> Result<reqwest::Response> {
        let url = self.url(path);
        debug!("[CommitmentsApi] GET {}", url);

        Ok(self.client.get(&url).send().await?)
    }
}

#[async_trait]
impl CommitmentsApi for HttpCommitmentsClient {
    async fn fetch_investors(&self) -> Result<Vec<Investor>> {
        let response = self.get("/investors").await?;

        let status = response.status();
        if !status.is_success() {
            debug!("[CommitmentsApi] /investors answered {}", status);
            return Err(ApiError::InvestorsUnavailable { status });
        }

        let body = response.text().await?;
        let investors: Vec<Investor> = serde_json::from_str(&body)?;

        info!("[CommitmentsApi] Fetched {} investors", investors.len());
        Ok(investors)
    }

    async fn fetch_investor_commitments(
        &self,
        investor_id: InvestorId,
    ) -> Result<InvestorCommitmentDetails> {
        let response = self
            .get(&format!("/investors/{}/commitments", investor_id))
            .await?;

        let status = response.status();
        if !status.is_success() {
            debug!(
                "[CommitmentsApi] commitments for investor {} answered {}",
                investor_id, status
            );
            return Err(ApiError::CommitmentsUnavailable {
                investor_id,
                status,
            });
        }

        let body = response.text().await?;
        let value: Value = serde_json::from_str(&body)?;
        validate_commitments_shape(&value)?;
        let details: InvestorCommitmentDetails = serde_json::from_value(value)?;

        info!(
            "[CommitmentsApi] Fetched {} commitments for investor {}",
            details.commitments.len(),
            investor_id
        );
        Ok(details)
    }
}
