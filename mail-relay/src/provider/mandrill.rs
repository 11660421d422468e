//! Mandrill (Mailchimp Transactional) provider.
//!
//! Mandrill answers a send call with one status record per recipient, or with
//! an error object when the call itself fails (bad key, validation error).

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use super::{EmailProvider, ProviderError};
use crate::config::Config;
use crate::request::SendRequest;
use crate::result::{SendResult, SendStatus};

const PROVIDER: &str = "mandrill";

/// Message used when a recipient comes back with a status we do not know.
pub const UNEXPECTED_STATUS_MESSAGE: &str = "Get an unexpected status from Mandrill!";

/// Mandrill API client.
#[derive(Clone)]
pub struct Mandrill {
    client: Client,
    api_key: String,
    base_url: String,
    ip_pool: String,
}

#[derive(Serialize)]
struct SendCall<'a> {
    key: &'a str,
    message: Message<'a>,
    #[serde(rename = "async")]
    async_send: bool,
    ip_pool: &'a str,
}

#[derive(Serialize)]
struct Message<'a> {
    from_email: &'a str,
    subject: &'a str,
    text: &'a str,
    to: [Recipient<'a>; 1],
}

#[derive(Serialize)]
struct Recipient<'a> {
    email: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
}

/// Per-recipient record returned by `messages/send`.
#[derive(Debug, Clone, Deserialize)]
pub struct RecipientStatus {
    pub email: String,
    /// One of "sent", "queued", "scheduled", "rejected" or "invalid"
    pub status: String,
    #[serde(default)]
    pub reject_reason: Option<String>,
    #[serde(default, rename = "_id")]
    pub id: Option<String>,
}

/// Error object returned when the call fails.
#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    name: Option<String>,
    message: String,
}

impl Mandrill {
    pub fn new(client: Client, config: &Config) -> Self {
        Self {
            client,
            api_key: config.mandrill_api_key.clone(),
            base_url: config.mandrill_base_url.clone(),
            ip_pool: config.mandrill_ip_pool.clone(),
        }
    }

    async fn call(&self, req: &SendRequest) -> Result<Vec<RecipientStatus>, ProviderError> {
        let url = format!("{}/messages/send.json", self.base_url);
        let body = SendCall {
            key: &self.api_key,
            message: Message {
                from_email: &req.from_email,
                subject: &req.subject,
                text: &req.content,
                to: [Recipient {
                    email: &req.to_email,
                    kind: "to",
                }],
            },
            async_send: false,
            ip_pool: &self.ip_pool,
        };

        let resp = self.client.post(&url).json(&body).send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        if status != StatusCode::OK {
            let message = match serde_json::from_str::<ApiError>(&text) {
                Ok(api_error) => {
                    debug!(
                        provider = PROVIDER,
                        error_name = api_error.name.as_deref().unwrap_or("unknown"),
                        "mandrill_api_error"
                    );
                    api_error.message
                }
                Err(_) if text.trim().is_empty() => status
                    .canonical_reason()
                    .map(str::to_string)
                    .unwrap_or_else(|| status.to_string()),
                Err(_) => text,
            };
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&text).map_err(|e| ProviderError::Decode(e.to_string()))
    }
}

#[async_trait]
impl EmailProvider for Mandrill {
    async fn send(&self, req: &SendRequest) -> SendResult {
        info!(provider = PROVIDER, to = %req.to_email, "mandrill_send_start");

        match self.call(req).await {
            Ok(records) => {
                info!(
                    provider = PROVIDER,
                    message_id = records.first().and_then(|r| r.id.as_deref()).unwrap_or(""),
                    "mandrill_send_complete"
                );
                classify(&records)
            }
            Err(e) => e.into_result(PROVIDER),
        }
    }

    fn name(&self) -> &'static str {
        PROVIDER
    }
}

/// Turn the recipient records of a send call into a result.
///
/// Only the first record matters since every request has one recipient.
pub fn classify(records: &[RecipientStatus]) -> SendResult {
    let Some(record) = records.first() else {
        error!(provider = PROVIDER, "mandrill_empty_response");
        return SendResult::error("Mandrill returned no recipient results");
    };

    match record.status.as_str() {
        "sent" | "queued" | "scheduled" => SendResult::success(),
        "rejected" => {
            let reason = record.reject_reason.as_deref().unwrap_or("unknown");
            info!(
                provider = PROVIDER,
                email = %record.email,
                reject_reason = reason,
                "mandrill_recipient_rejected"
            );
            SendResult::rejected(format!(
                "email to {} was rejected due to {}",
                record.email, reason
            ))
        }
        other => {
            error!(provider = PROVIDER, status = other, "mandrill_unexpected_status");
            SendResult::new(SendStatus::Other(other.to_string()), UNEXPECTED_STATUS_MESSAGE)
        }
    }
}
