//! Shared HTTP Client Module
//!
//! Builds the reqwest client used by every provider backend. The timeout is the
//! caller-specified network budget for a single generation call; there is no
//! other deadline in the pipeline.

use crate::error::ProviderError;
use reqwest::Client;
use std::time::Duration;

/// Default per-request timeout for generation calls
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Build an HTTP client for provider calls
///
/// Configuration tuned for long, sequential generation requests:
/// - caller-specified request timeout
/// - a small idle pool (one file is processed at a time)
/// - TCP keepalive so consecutive files reuse the connection
pub fn build_provider_client(timeout: Duration) -> Result<Client, ProviderError> {
    Client::builder()
        .timeout(timeout)
        .pool_max_idle_per_host(2)
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Duration::from_secs(60))
        .tcp_nodelay(true)
        .build()
        .map_err(|e| ProviderError::Http(format!("Failed to create HTTP client: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_is_created() {
        // Building a client should not fail with default settings
        assert!(build_provider_client(DEFAULT_TIMEOUT).is_ok());
    }
}
