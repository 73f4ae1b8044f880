//! Error types for the dashboard crate.

use commitments_api::ApiError;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("Missing configuration key: {0}")]
    MissingConfigKey(String),

    #[error("Invalid configuration value for {key}: {value}")]
    InvalidConfigValue { key: String, value: String },
}
