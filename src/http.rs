//! Shared HTTP client for the weather, routing and geocoding providers

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};

use crate::config::ProvidersConfig;

/// Build a client with timeout, user agent and transient-error retries
pub fn build_client(config: &ProvidersConfig) -> Result<ClientWithMiddleware> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds.into()))
        .user_agent(config.user_agent.clone())
        .build()
        .with_context(|| "Failed to create HTTP client")?;

    let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);

    Ok(ClientBuilder::new(client)
        .with(RetryTransientMiddleware::new_with_policy(retry_policy))
        .build())
}

/// Join a base URL and a path without doubling slashes
#[must_use]
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("https://api.open-meteo.com/v1/", "/forecast"),
            "https://api.open-meteo.com/v1/forecast"
        );
        assert_eq!(join_url("http://localhost:1234", "search"), "http://localhost:1234/search");
    }

    #[test]
    fn test_build_client_from_defaults() {
        assert!(build_client(&ProvidersConfig::default()).is_ok());
    }
}
