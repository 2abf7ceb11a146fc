//! Types for verification service results

use chrono::{DateTime, Utc};

use crate::domain::entities::Purpose;

/// Result of issuing and delivering a code
#[derive(Debug, Clone)]
pub struct IssuedCode {
    /// Normalized identifier the code was sent to
    pub identifier: String,
    pub purpose: Purpose,
    pub expires_at: DateTime<Utc>,
    /// When the caller may ask for another code
    pub next_resend_at: DateTime<Utc>,
    /// Message ID from the delivery provider
    pub message_id: String,
}
