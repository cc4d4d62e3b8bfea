//! # Folio API Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::middleware::Condition;
use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod state;
mod telemetry;
mod validation;

use config::AppConfig;
use middleware::error::redact_internal_errors;
use state::AppState;
use telemetry::TelemetryConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    tracing::info!(
        host = %config.host,
        port = config.port,
        verbose_errors = config.verbose_errors,
        "Starting Folio API Server"
    );

    let state = AppState::from_config(&config)
        .await
        .map_err(std::io::Error::other)?;

    let verbose_errors = config.verbose_errors;

    HttpServer::new(move || {
        App::new()
            .wrap(Condition::new(!verbose_errors, redact_internal_errors()))
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
            .default_service(web::to(handlers::route_not_found))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
