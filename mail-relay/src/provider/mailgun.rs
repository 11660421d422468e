//! Mailgun provider.
//!
//! Mailgun takes form-encoded fields and answers with a small JSON object
//! carrying a human readable `message` and, on success, the queued message id.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::info;

use super::{EmailProvider, ProviderError};
use crate::config::Config;
use crate::request::SendRequest;
use crate::result::SendResult;

const PROVIDER: &str = "mailgun";

/// Mailgun API client.
#[derive(Clone)]
pub struct Mailgun {
    client: Client,
    api_key: String,
    messages_url: String,
}

/// Body of a messages endpoint response.
#[derive(Debug, Deserialize)]
struct MessagesResponse {
    message: String,
    #[serde(default)]
    id: Option<String>,
}

impl Mailgun {
    pub fn new(client: Client, config: &Config) -> Self {
        Self {
            client,
            api_key: config.mailgun_api_key.clone(),
            messages_url: config.mailgun_message_base_url.clone(),
        }
    }

    async fn call(&self, req: &SendRequest) -> Result<Option<String>, ProviderError> {
        let form = [
            ("from", req.from_email.as_str()),
            ("to", req.to_email.as_str()),
            ("subject", req.subject.as_str()),
            ("text", req.content.as_str()),
        ];

        let resp = self
            .client
            .post(&self.messages_url)
            .basic_auth("api", Some(&self.api_key))
            .form(&form)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        let parsed = serde_json::from_str::<MessagesResponse>(&text).ok();

        info!(
            provider = PROVIDER,
            status_code = status.as_u16(),
            message = parsed.as_ref().map(|r| r.message.as_str()).unwrap_or(""),
            "mailgun_response"
        );

        if status != StatusCode::OK {
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: parsed.map(|r| r.message).unwrap_or(text),
            });
        }

        Ok(parsed.and_then(|r| r.id))
    }
}

#[async_trait]
impl EmailProvider for Mailgun {
    async fn send(&self, req: &SendRequest) -> SendResult {
        info!(provider = PROVIDER, to = %req.to_email, "mailgun_send_start");

        match self.call(req).await {
            Ok(id) => {
                info!(
                    provider = PROVIDER,
                    message_id = id.as_deref().unwrap_or(""),
                    "mailgun_send_complete"
                );
                SendResult::success()
            }
            Err(e) => e.into_result(PROVIDER),
        }
    }

    fn name(&self) -> &'static str {
        PROVIDER
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::SendStatus;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> Config {
        Config {
            mandrill_api_key: String::new(),
            mandrill_base_url: String::new(),
            mandrill_ip_pool: String::new(),
            mailgun_api_key: "key-test".to_string(),
            mailgun_message_base_url: format!("{}/v3/example.com/messages", server.uri()),
            request_timeout_ms: 2000,
            port: 0,
        }
    }

    fn request() -> SendRequest {
        SendRequest::new("uber@example.com", "dawen@example.com", "hello", "content to send")
    }

    #[tokio::test]
    async fn test_send_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v3/example.com/messages"))
            .and(header("authorization", "Basic YXBpOmtleS10ZXN0"))
            .and(body_string_contains("to=dawen%40example.com"))
            .and(body_string_contains("from=uber%40example.com"))
            .and(body_string_contains("subject=hello"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "<20240101.1@example.com>",
                "message": "Queued. Thank you."
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mailgun = Mailgun::new(Client::new(), &config_for(&server));
        let result = mailgun.send(&request()).await;

        assert!(result.is_success());
        assert_eq!(result.message(), "Email sent successfully!");
        assert_eq!(result.code(), 200);
    }

    #[tokio::test]
    async fn test_send_bad_request_uses_provider_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "message": "'to' parameter is not a valid address. please check documentation"
            })))
            .mount(&server)
            .await;

        let mailgun = Mailgun::new(Client::new(), &config_for(&server));
        let result = mailgun.send(&request()).await;

        assert_eq!(result.status(), &SendStatus::Error);
        assert_eq!(
            result.message(),
            "'to' parameter is not a valid address. please check documentation"
        );
        assert_eq!(result.code(), 400);
    }

    #[tokio::test]
    async fn test_send_server_error_normalized_to_400() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Forbidden"))
            .mount(&server)
            .await;

        let mailgun = Mailgun::new(Client::new(), &config_for(&server));
        let result = mailgun.send(&request()).await;

        assert_eq!(result.status(), &SendStatus::Error);
        assert_eq!(result.message(), "Forbidden");
        assert_eq!(result.code(), 400);
    }

    #[tokio::test]
    async fn test_send_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"message": "Queued. Thank you."}))
                    .set_delay(std::time::Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(50))
            .build()
            .unwrap();
        let mailgun = Mailgun::new(client, &config_for(&server));
        let result = mailgun.send(&request()).await;

        assert_eq!(result.status(), &SendStatus::Error);
        assert!(result.message().starts_with("request failed"));
    }
}
