use actix_web::{web, HttpResponse};

use jt_core::repositories::{AccountRepository, VerificationStore};
use jt_core::services::verification::DeliveryGateway;

use crate::dto::{AccountCheckRequest, AccountCheckResponse, CurrentAccountResponse};
use crate::handlers::{validate_request, ApiError};
use crate::middleware::AuthContext;

use super::AppState;

/// Handler for POST /accounts/check
///
/// Reports whether an account matches the email and/or mobile number.
/// At least one of them is required (400 otherwise).
pub async fn check<A, S, G>(
    state: web::Data<AppState<A, S, G>>,
    request: web::Json<AccountCheckRequest>,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + ?Sized + 'static,
    S: VerificationStore + ?Sized + 'static,
    G: DeliveryGateway + ?Sized + 'static,
{
    let request = request.into_inner();
    validate_request(&request)?;

    let check = state
        .auth_service
        .check_account(request.email.as_deref(), request.mobile.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(AccountCheckResponse::from(check)))
}

/// Handler for GET /accounts/me
///
/// Requires `Authorization: Bearer <token>`; 401 when it is missing or invalid.
pub async fn me<A, S, G>(
    state: web::Data<AppState<A, S, G>>,
    auth: AuthContext,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + ?Sized + 'static,
    S: VerificationStore + ?Sized + 'static,
    G: DeliveryGateway + ?Sized + 'static,
{
    tracing::debug!(account_id = %auth.account_id, jti = %auth.jti, "Loading current account");

    let account = state.auth_service.current_account(&auth.claims).await?;

    Ok(HttpResponse::Ok().json(CurrentAccountResponse { account }))
}
