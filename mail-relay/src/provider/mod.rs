//! Transactional email providers.
//!
//! Each provider wraps one external HTTP API behind [`EmailProvider`] and
//! translates whatever that API answers into a [`SendResult`]. Provider
//! specific failures never leave the adapter.
//!
//! ## Providers
//!
//! ```text
//! Mandrill (primary) → Mailgun (secondary)
//! ```

pub mod mailgun;
pub mod mandrill;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::error;

use crate::config::Config;
use crate::request::SendRequest;
use crate::result::SendResult;

pub use mailgun::Mailgun;
pub use mandrill::Mandrill;

/// A transactional email API.
#[async_trait]
pub trait EmailProvider: Send + Sync {
    /// Send one email. Always returns a result, never an error.
    async fn send(&self, req: &SendRequest) -> SendResult;

    /// Short provider name used in logs.
    fn name(&self) -> &'static str;
}

/// Failure while talking to a provider.
///
/// Only used inside the adapters; converted to an `error` result at the
/// adapter boundary.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered with a failure of its own.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ProviderError {
    /// Log the failure and turn it into the result handed to the caller.
    pub(crate) fn into_result(self, provider: &'static str) -> SendResult {
        match &self {
            ProviderError::Transport(e) if e.is_timeout() => {
                error!(provider = provider, error = %e, "provider_send_timeout");
            }
            ProviderError::Transport(e) => {
                error!(provider = provider, error = %e, "provider_send_request_error");
            }
            ProviderError::Api { status, message } => {
                error!(
                    provider = provider,
                    status_code = status,
                    message = %message,
                    "provider_send_rejected_call"
                );
            }
            ProviderError::Decode(detail) => {
                error!(provider = provider, detail = %detail, "provider_response_decode_failed");
            }
        }

        SendResult::error(self.to_string())
    }
}

/// Build the HTTP client shared by both providers.
///
/// The configured timeout bounds every provider call.
pub fn build_http_client(config: &Config) -> Result<Client> {
    Client::builder()
        .timeout(config.request_timeout())
        .pool_max_idle_per_host(16)
        .build()
        .context("Failed to create HTTP client")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_keeps_provider_message() {
        let err = ProviderError::Api {
            status: 400,
            message: "'to' parameter is not a valid address. please check documentation"
                .to_string(),
        };

        let result = err.into_result("mailgun");

        assert_eq!(
            result.message(),
            "'to' parameter is not a valid address. please check documentation"
        );
        assert_eq!(result.code(), 400);
        assert!(!result.is_success());
    }

    #[test]
    fn test_decode_error_is_error_result() {
        let result = ProviderError::Decode("expected value".to_string()).into_result("mandrill");

        assert_eq!(result.status().as_str(), "error");
        assert!(result.message().contains("expected value"));
    }
}
