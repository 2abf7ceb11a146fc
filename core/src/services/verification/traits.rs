//! Delivery gateway boundary

use async_trait::async_trait;

use crate::domain::entities::Purpose;

use super::message::OutboundMessage;

/// Sends messages to users (email, SMS, ...)
#[async_trait]
pub trait DeliveryGateway: Send + Sync {
    /// Send a rendered message; returns the provider's message ID
    async fn send_message(&self, message: &OutboundMessage) -> Result<String, String>;

    /// Short provider name for logs
    fn provider_name(&self) -> &str;

    /// Send a one-time code
    async fn send_code(
        &self,
        identifier: &str,
        code: &str,
        purpose: Purpose,
        ttl_minutes: i64,
    ) -> Result<String, String> {
        let message = OutboundMessage::verification_code(identifier, code, purpose, ttl_minutes);
        self.send_message(&message).await
    }

    /// Send the post-signup greeting
    async fn send_welcome(&self, identifier: &str, name: &str) -> Result<String, String> {
        let message = OutboundMessage::welcome(identifier, name);
        self.send_message(&message).await
    }
}
