use actix_web::{web, HttpResponse};

use jt_core::repositories::{AccountRepository, VerificationStore};
use jt_core::services::verification::DeliveryGateway;
use jt_shared::types::HealthResponse;

use super::AppState;

/// Handler for GET /health
pub async fn health<A, S, G>(state: web::Data<AppState<A, S, G>>) -> HttpResponse
where
    A: AccountRepository + ?Sized + 'static,
    S: VerificationStore + ?Sized + 'static,
    G: DeliveryGateway + ?Sized + 'static,
{
    HttpResponse::Ok().json(HealthResponse::ok(
        state.environment,
        env!("CARGO_PKG_VERSION"),
    ))
}
