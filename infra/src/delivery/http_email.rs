//! Email delivery through a Brevo-compatible HTTP API
//!
//! `POST {api_url}` with an `api-key` header and a JSON body of sender,
//! recipients, subject and HTML/text content. A 2xx response carries the
//! provider's `messageId`.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info};
use uuid::Uuid;

use jt_core::services::verification::{DeliveryGateway, OutboundMessage};
use jt_shared::config::DeliveryConfig;
use jt_shared::utils::mask_email;

use crate::InfrastructureError;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EmailAddress {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SendEmailBody {
    pub sender: EmailAddress,
    pub to: Vec<EmailAddress>,
    pub subject: String,
    pub html_content: String,
    pub text_content: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendEmailResponse {
    message_id: Option<String>,
}

/// HTTP email gateway
pub struct HttpEmailGateway {
    client: Client,
    config: DeliveryConfig,
}

impl HttpEmailGateway {
    pub fn new(config: &DeliveryConfig) -> Result<Self, InfrastructureError> {
        if !config.has_api_key() {
            return Err(InfrastructureError::Config(
                "EMAIL_API_KEY is required for the HTTP email gateway".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .user_agent(concat!("jt-server/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    pub(crate) fn build_body(&self, message: &OutboundMessage) -> SendEmailBody {
        SendEmailBody {
            sender: EmailAddress {
                email: self.config.sender_address.clone(),
                name: Some(self.config.sender_name.clone()).filter(|n| !n.trim().is_empty()),
            },
            to: vec![EmailAddress {
                email: message.recipient.clone(),
                name: None,
            }],
            subject: message.subject.clone(),
            html_content: message.html_body.clone(),
            text_content: message.text_body.clone(),
        }
    }

    async fn post(&self, body: &SendEmailBody) -> Result<String, InfrastructureError> {
        let response = self
            .client
            .post(&self.config.api_url)
            .header("api-key", self.config.api_key.trim())
            .header("Accept", "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(InfrastructureError::Delivery(format!(
                "Email API returned status {}: {}",
                status.as_u16(),
                text
            )));
        }

        // Some compatible APIs answer 201/202 with an empty body
        let message_id = response
            .json::<SendEmailResponse>()
            .await
            .ok()
            .and_then(|r| r.message_id)
            .unwrap_or_else(|| format!("email-{}", Uuid::new_v4()));

        Ok(message_id)
    }
}

#[async_trait]
impl DeliveryGateway for HttpEmailGateway {
    async fn send_message(&self, message: &OutboundMessage) -> Result<String, String> {
        let body = self.build_body(message);
        let recipient = mask_email(&message.recipient);

        match self.post(&body).await {
            Ok(message_id) => {
                info!(
                    target: "delivery",
                    provider = self.provider_name(),
                    recipient = %recipient,
                    kind = ?message.kind,
                    message_id = %message_id,
                    "Email accepted by provider"
                );
                Ok(message_id)
            }
            Err(e) => {
                error!(
                    target: "delivery",
                    provider = self.provider_name(),
                    recipient = %recipient,
                    error = %e,
                    "Email delivery failed"
                );
                Err(e.to_string())
            }
        }
    }

    fn provider_name(&self) -> &str {
        "email-api"
    }
}
