//! Application factory
//!
//! Builds the Actix-web `App` with state, JSON limits and routes. Middleware
//! (tracing, CORS, request id) is wrapped by the caller so tests can drive
//! the bare application.

use actix_web::{
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, HttpResponse,
};

use jt_core::repositories::{AccountRepository, VerificationStore};
use jt_core::services::token::SessionTokenService;
use jt_core::services::verification::DeliveryGateway;
use jt_shared::errors::ErrorResponse;

use crate::handlers::json_error_handler;
use crate::routes::{accounts, health, otp, AppState};

/// Create the application with all routes
///
/// `tokens` is registered separately so the `AuthContext` extractor can
/// verify bearer tokens without knowing the state's type parameters.
pub fn create_app<A, S, G>(
    state: web::Data<AppState<A, S, G>>,
    tokens: web::Data<SessionTokenService>,
    max_payload_size: usize,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    A: AccountRepository + ?Sized + 'static,
    S: VerificationStore + ?Sized + 'static,
    G: DeliveryGateway + ?Sized + 'static,
{
    let json_config = web::JsonConfig::default()
        .limit(max_payload_size)
        .error_handler(json_error_handler);

    App::new()
        .app_data(state)
        .app_data(tokens)
        .app_data(json_config)
        .route("/health", web::get().to(health::health::<A, S, G>))
        .service(
            web::scope("/otp")
                .route("/request", web::post().to(otp::request_code::<A, S, G>))
                .route("/verify", web::post().to(otp::verify_code::<A, S, G>)),
        )
        .service(
            web::scope("/accounts")
                .route("/check", web::post().to(accounts::check::<A, S, G>))
                .route("/me", web::get().to(accounts::me::<A, S, G>)),
        )
        .default_service(web::route().to(not_found))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new("Not found"))
}
