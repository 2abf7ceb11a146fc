use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

use jt_api::middleware::{create_cors, RequestIdHeader};
use jt_api::telemetry::init_tracing;
use jt_api::{create_app, AppState};
use jt_core::services::auth::{AuthService, AuthServiceConfig};
use jt_core::services::token::{SessionTokenService, TokenServiceConfig};
use jt_core::services::verification::{
    ExpiredCodeSweeper, SweeperConfig, VerificationService, VerificationServiceConfig,
};
use jt_infra::build_backends;
use jt_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the process environment still applies
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("invalid configuration")?;
    init_tracing(&config.logging)?;
    config.validate().context("configuration rejected")?;

    tracing::info!(
        environment = %config.environment,
        version = env!("CARGO_PKG_VERSION"),
        "Starting Jharkhand Tourism API"
    );

    let backends = build_backends(&config)
        .await
        .context("failed to initialize backends")?;

    let verification = Arc::new(VerificationService::new(
        backends.store.clone(),
        backends.gateway.clone(),
        VerificationServiceConfig::from(&config.otp),
    ));
    let tokens = Arc::new(SessionTokenService::new(TokenServiceConfig::from(&config.jwt)));
    let auth_service = Arc::new(AuthService::new(
        backends.accounts.clone(),
        verification,
        tokens.clone(),
        AuthServiceConfig::default(),
    ));

    let sweeper = Arc::new(ExpiredCodeSweeper::new(
        backends.store.clone(),
        SweeperConfig::from(&config.otp),
    ));
    let sweeper_handle = sweeper.start_background_task();

    let state = web::Data::new(AppState::new(auth_service, config.environment));
    let token_data = web::Data::from(tokens);
    let cors_config = config.cors.clone();
    let max_payload_size = config.server.max_payload_size;
    let bind_address = config.server.bind_address();

    let mut server = HttpServer::new(move || {
        create_app(state.clone(), token_data.clone(), max_payload_size)
            .wrap(RequestIdHeader)
            .wrap(create_cors(&cors_config))
            .wrap(TracingLogger::default())
    })
    .keep_alive(Duration::from_secs(config.server.keep_alive));

    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    tracing::info!(address = %bind_address, "Binding HTTP server");

    let result = server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {bind_address}"))?
        .run()
        .await;

    tracing::info!("HTTP server stopped");

    if let Some(handle) = sweeper_handle {
        handle.abort();
    }
    if let Some(database) = &backends.database {
        database.close().await;
    }

    result.context("HTTP server error")
}
