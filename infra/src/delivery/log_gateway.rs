//! Log-only delivery gateway
//!
//! Writes every message to the `delivery` tracing target instead of sending
//! it. Used in development, and in tests through the counter and the failure
//! switch.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use jt_core::services::verification::{DeliveryGateway, OutboundMessage};
use jt_shared::utils::mask_email;

/// Gateway that logs messages rather than delivering them
#[derive(Clone, Default)]
pub struct LogDeliveryGateway {
    message_count: Arc<AtomicU64>,
    simulate_failure: Arc<AtomicBool>,
}

impl LogDeliveryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// A gateway that rejects every message
    pub fn failing() -> Self {
        let gateway = Self::new();
        gateway.set_simulate_failure(true);
        gateway
    }

    /// Number of messages logged so far
    pub fn message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }
}

#[async_trait]
impl DeliveryGateway for LogDeliveryGateway {
    async fn send_message(&self, message: &OutboundMessage) -> Result<String, String> {
        let recipient = mask_email(&message.recipient);

        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!(
                target: "delivery",
                provider = "log",
                recipient = %recipient,
                "Log gateway simulating delivery failure"
            );
            return Err("Simulated delivery failure".to_string());
        }

        let message_id = format!("log_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        info!(
            target: "delivery",
            provider = "log",
            recipient = %recipient,
            kind = ?message.kind,
            message_id = %message_id,
            sequence = count,
            subject = %message.subject,
            body = %message.text_body,
            "Message logged instead of sent"
        );

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "log"
    }
}
