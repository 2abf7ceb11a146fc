//! DTOs for `/otp/request` and `/otp/verify`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use jt_core::domain::entities::Purpose;
use jt_core::domain::value_objects::AccountAttributes;
use jt_core::services::verification::IssuedCode;

/// Body of `POST /otp/request`
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OtpRequest {
    #[validate(length(min = 1, max = 320))]
    pub identifier: String,

    pub purpose: Purpose,
}

/// `202` body of `POST /otp/request`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpRequestResponse {
    pub identifier: String,
    pub expires_at: DateTime<Utc>,
    /// Seconds until another code may be requested
    pub resend_after: i64,
}

impl OtpRequestResponse {
    pub fn from_issued(issued: &IssuedCode, now: DateTime<Utc>) -> Self {
        Self {
            identifier: issued.identifier.clone(),
            expires_at: issued.expires_at,
            resend_after: (issued.next_resend_at - now).num_seconds().max(0),
        }
    }
}

/// Body of `POST /otp/verify`
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OtpVerifyRequest {
    #[validate(length(min = 1, max = 320))]
    pub identifier: String,

    pub purpose: Purpose,

    #[validate(length(min = 1, max = 16))]
    pub code: String,

    #[serde(default)]
    pub account_attributes: Option<AccountAttributes>,
}
