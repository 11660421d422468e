//! Configuration module for environment variable parsing.
//!
//! Everything is read once at startup and handed to the providers when they
//! are constructed.

use std::env;
use std::time::Duration;
use tracing::warn;

/// Default Mandrill API root.
pub const DEFAULT_MANDRILL_BASE_URL: &str = "https://mandrillapp.com/api/1.0";

/// Default Mandrill dedicated IP pool.
pub const DEFAULT_MANDRILL_IP_POOL: &str = "Main Pool";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Mandrill API key
    pub mandrill_api_key: String,

    /// Mandrill API root, without trailing slash
    pub mandrill_base_url: String,

    /// Mandrill dedicated IP pool to send from
    pub mandrill_ip_pool: String,

    /// Mailgun API key (used as the basic auth password)
    pub mailgun_api_key: String,

    /// Full Mailgun messages endpoint, e.g. `https://api.mailgun.net/v3/<domain>/messages`
    pub mailgun_message_base_url: String,

    /// HTTP request timeout in milliseconds, applied to every provider call
    pub request_timeout_ms: u64,

    /// Port for the web server to listen on
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let config = Config {
            mandrill_api_key: env::var("MANDRILL_API_KEY").unwrap_or_default(),

            mandrill_base_url: env::var("MANDRILL_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_MANDRILL_BASE_URL.to_string()),

            mandrill_ip_pool: env::var("MANDRILL_IP_POOL")
                .unwrap_or_else(|_| DEFAULT_MANDRILL_IP_POOL.to_string()),

            mailgun_api_key: env::var("MAILGUN_API_KEY").unwrap_or_default(),

            mailgun_message_base_url: env::var("MAILGUN_MESSAGE_BASE_URL").unwrap_or_default(),

            request_timeout_ms: parse_or("REQUEST_TIMEOUT_MS", 8000),

            port: parse_or("PORT", 8080),
        };

        if config.mandrill_api_key.is_empty() {
            warn!(env_var = "MANDRILL_API_KEY", "provider_key_missing");
        }
        if config.mailgun_api_key.is_empty() {
            warn!(env_var = "MAILGUN_API_KEY", "provider_key_missing");
        }
        if config.mailgun_message_base_url.is_empty() {
            warn!(env_var = "MAILGUN_MESSAGE_BASE_URL", "provider_url_missing");
        }

        config
    }

    /// Per-call timeout for provider requests.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// Parse a variable, falling back to `default` when unset or malformed.
fn parse_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => match raw.trim().parse() {
            Ok(v) => v,
            Err(_) => {
                warn!(env_var = name, value = %raw, "Invalid value, using default");
                default
            }
        },
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_or_valid() {
        env::set_var("TEST_RELAY_TIMEOUT", "2500");
        let result: u64 = parse_or("TEST_RELAY_TIMEOUT", 0);
        assert_eq!(result, 2500);
        env::remove_var("TEST_RELAY_TIMEOUT");
    }

    #[test]
    fn test_parse_or_invalid_uses_default() {
        env::set_var("TEST_RELAY_PORT", "not-a-port");
        let result: u16 = parse_or("TEST_RELAY_PORT", 8080);
        assert_eq!(result, 8080);
        env::remove_var("TEST_RELAY_PORT");
    }

    #[test]
    fn test_parse_or_default() {
        let result: u64 = parse_or("NONEXISTENT_RELAY_VAR", 42);
        assert_eq!(result, 42);
    }
}
