use actix_web::{web, HttpResponse};
use chrono::Utc;

use jt_core::repositories::{AccountRepository, VerificationStore};
use jt_core::services::verification::DeliveryGateway;
use jt_shared::utils::mask_email;

use crate::dto::{OtpRequest, OtpRequestResponse, OtpVerifyRequest};
use crate::handlers::{validate_request, ApiError};

use super::AppState;

/// Handler for POST /otp/request
///
/// Issues a six-digit code for `{identifier, purpose}` and delivers it.
///
/// # Response
///
/// ## Success (202 Accepted)
/// ```json
/// { "identifier": "a@x.com", "expiresAt": "2026-01-01T10:10:00Z", "resendAfter": 60 }
/// ```
///
/// ## Errors
/// - 400 Bad Request: invalid identifier
/// - 404 Not Found: login or password reset for an unknown account
/// - 409 Conflict: signup for an existing account
/// - 429 Too Many Requests: resend cooldown, with `Retry-After`
/// - 503 Service Unavailable: the code could not be delivered
pub async fn request_code<A, S, G>(
    state: web::Data<AppState<A, S, G>>,
    request: web::Json<OtpRequest>,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + ?Sized + 'static,
    S: VerificationStore + ?Sized + 'static,
    G: DeliveryGateway + ?Sized + 'static,
{
    let request = request.into_inner();
    validate_request(&request)?;

    tracing::debug!(
        identifier = %mask_email(&request.identifier),
        purpose = %request.purpose,
        "Verification code requested"
    );

    let issued = state
        .auth_service
        .request_code(&request.identifier, request.purpose)
        .await?;

    Ok(HttpResponse::Accepted().json(OtpRequestResponse::from_issued(&issued, Utc::now())))
}

/// Handler for POST /otp/verify
///
/// Checks the submitted code and completes signup, login or password reset.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "account": { "id": "...", "identifier": "a@x.com", "isVerified": true }, "token": "eyJ..." }
/// ```
///
/// ## Errors
/// - 400 Bad Request: missing fields, or a wrong, expired or unknown code
/// - 404 Not Found: login or password reset for an unknown account
/// - 409 Conflict: signup for an existing account
pub async fn verify_code<A, S, G>(
    state: web::Data<AppState<A, S, G>>,
    request: web::Json<OtpVerifyRequest>,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + ?Sized + 'static,
    S: VerificationStore + ?Sized + 'static,
    G: DeliveryGateway + ?Sized + 'static,
{
    let request = request.into_inner();
    validate_request(&request)?;

    let outcome = state
        .auth_service
        .verify_and_complete(
            &request.identifier,
            request.purpose,
            &request.code,
            request.account_attributes.as_ref(),
        )
        .await?;

    tracing::info!(
        account_id = %outcome.account.id,
        purpose = %request.purpose,
        "Verification completed"
    );

    Ok(HttpResponse::Ok().json(outcome))
}
