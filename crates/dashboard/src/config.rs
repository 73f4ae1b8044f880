//! Runtime configuration, read from the environment.

use std::str::FromStr;
use std::time::Duration;

use crate::errors::{Error, Result};
use crate::query::RetryPolicy;

pub const API_URL_KEY: &str = "COMMITMENTS_API_URL";
pub const REQUEST_TIMEOUT_KEY: &str = "COMMITMENTS_REQUEST_TIMEOUT_MS";
pub const QUERY_RETRIES_KEY: &str = "COMMITMENTS_QUERY_RETRIES";
pub const RETRY_DELAY_KEY: &str = "COMMITMENTS_RETRY_DELAY_MS";
pub const STALE_TIME_KEY: &str = "COMMITMENTS_STALE_TIME_MS";
pub const REFETCH_ON_FOCUS_KEY: &str = "COMMITMENTS_REFETCH_ON_FOCUS";

const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_STALE_TIME_MS: u64 = 300_000;

#[derive(Clone, Debug)]
pub struct DashboardConfig {
    /// Base URL of the commitments API, without a trailing slash.
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub retry: RetryPolicy,
    /// How long a cached query result is served without refetching.
    pub stale_time: Duration,
    pub refetch_on_focus: bool,
}

impl DashboardConfig {
    /// Config with defaults for everything but the base URL.
    pub fn new(api_base_url: &str) -> Self {
        Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            retry: RetryPolicy::default(),
            stale_time: Duration::from_millis(DEFAULT_STALE_TIME_MS),
            refetch_on_focus: false,
        }
    }

    /// Reads the process environment, after loading a `.env` file if present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    ///
    /// A missing or blank [`API_URL_KEY`] is an error: the dashboard has
    /// nothing to talk to without it.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup(API_URL_KEY)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::MissingConfigKey(API_URL_KEY.to_string()))?;

        let mut config = Self::new(&api_base_url);
        let defaults = RetryPolicy::default();

        if let Some(ms) = parse_opt::<u64, _>(&lookup, REQUEST_TIMEOUT_KEY)? {
            config.request_timeout = Duration::from_millis(ms);
        }
        config.retry = RetryPolicy {
            retries: parse_opt(&lookup, QUERY_RETRIES_KEY)?.unwrap_or(defaults.retries),
            base_delay: parse_opt::<u64, _>(&lookup, RETRY_DELAY_KEY)?
                .map(Duration::from_millis)
                .unwrap_or(defaults.base_delay),
            max_delay: defaults.max_delay,
        };
        if let Some(ms) = parse_opt::<u64, _>(&lookup, STALE_TIME_KEY)? {
            config.stale_time = Duration::from_millis(ms);
        }
        if let Some(flag) = parse_opt(&lookup, REFETCH_ON_FOCUS_KEY)? {
            config.refetch_on_focus = flag;
        }

        Ok(config)
    }
}

fn parse_opt<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| Error::InvalidConfigValue {
                key: key.to_string(),
                value: raw,
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_api_url_is_fatal() {
        let result = DashboardConfig::from_lookup(lookup_from(&[]));
        assert!(matches!(result, Err(Error::MissingConfigKey(key)) if key == API_URL_KEY));
    }

    #[test]
    fn test_blank_api_url_is_fatal() {
        let result = DashboardConfig::from_lookup(lookup_from(&[(API_URL_KEY, "  ")]));
        assert!(matches!(result, Err(Error::MissingConfigKey(_))));
    }

    #[test]
    fn test_defaults() {
        let config =
            DashboardConfig::from_lookup(lookup_from(&[(API_URL_KEY, "http://api.local/")]))
                .unwrap();

        assert_eq!(config.api_base_url, "http://api.local");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.retry.retries, 1);
        assert_eq!(config.stale_time, Duration::from_secs(300));
        assert!(!config.refetch_on_focus);
    }

    #[test]
    fn test_overrides() {
        let config = DashboardConfig::from_lookup(lookup_from(&[
            (API_URL_KEY, "http://api.local"),
            (REQUEST_TIMEOUT_KEY, "5000"),
            (QUERY_RETRIES_KEY, "3"),
            (RETRY_DELAY_KEY, "10"),
            (STALE_TIME_KEY, "0"),
            (REFETCH_ON_FOCUS_KEY, "true"),
        ]))
        .unwrap();

        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.retry.retries, 3);
        assert_eq!(config.retry.base_delay, Duration::from_millis(10));
        assert_eq!(config.stale_time, Duration::ZERO);
        assert!(config.refetch_on_focus);
    }

    #[test]
    fn test_invalid_value() {
        let result = DashboardConfig::from_lookup(lookup_from(&[
            (API_URL_KEY, "http://api.local"),
            (QUERY_RETRIES_KEY, "once"),
        ]));
        match result {
            Err(Error::InvalidConfigValue { key, value }) => {
                assert_eq!(key, QUERY_RETRIES_KEY);
                assert_eq!(value, "once");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
