//! Outbound message delivery
//!
//! Gateways implementing `jt_core`'s `DeliveryGateway`:
//! - `HttpEmailGateway`: transactional email API over HTTPS
//! - `LogDeliveryGateway`: writes messages to the log, for development

pub mod http_email;
pub mod log_gateway;


use std::sync::Arc;

use jt_core::services::verification::DeliveryGateway;
use jt_shared::config::{DeliveryConfig, DeliveryProvider, Environment};
use tracing::{info, warn};

pub use http_email::HttpEmailGateway;
pub use log_gateway::LogDeliveryGateway;

use crate::InfrastructureError;

/// Build the gateway selected by `config.provider`
///
/// An HTTP provider without an API key falls back to the log gateway,
/// except in production where it is a configuration error.
pub fn create_delivery_gateway(
    config: &DeliveryConfig,
    environment: Environment,
) -> Result<Arc<dyn DeliveryGateway>, InfrastructureError> {
    match config.provider {
        DeliveryProvider::Http if config.has_api_key() => {
            info!(api_url = %config.api_url, "Using HTTP email delivery gateway");
            Ok(Arc::new(HttpEmailGateway::new(config)?))
        }
        DeliveryProvider::Http if environment.is_production() => Err(InfrastructureError::Config(
            "EMAIL_API_KEY must be set for the http delivery provider in production".to_string(),
        )),
        DeliveryProvider::Http => {
            warn!("EMAIL_API_KEY is not set; falling back to log delivery gateway");
            Ok(Arc::new(LogDeliveryGateway::new()))
        }
        DeliveryProvider::Log => {
            info!("Using log delivery gateway");
            Ok(Arc::new(LogDeliveryGateway::new()))
        }
    }
}
