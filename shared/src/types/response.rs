//! API response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Environment;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "ok" when the process can answer
    pub status: String,

    /// Service banner
    pub message: String,

    /// Response timestamp
    pub timestamp: DateTime<Utc>,

    /// Running environment
    pub environment: String,

    /// Service version
    pub version: String,
}

impl HealthResponse {
    /// Create a healthy response for the given environment and version
    pub fn ok(environment: Environment, version: impl Into<String>) -> Self {
        Self {
            status: String::from("ok"),
            message: String::from("Jharkhand Tourism API is running"),
            timestamp: Utc::now(),
            environment: environment.to_string(),
            version: version.into(),
        }
    }
}
