//! # Blog Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod state;
mod telemetry;
mod views;

use config::AppConfig;
use middleware::MethodOverride;
use state::AppState;
use telemetry::TelemetryConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    tracing::info!("Starting blog server on {}:{}", config.host, config.port);

    let state = AppState::new(config.database.as_ref()).await;

    let app_state = state.clone();
    let static_dir = config.static_dir.clone();
    if !static_dir.is_dir() {
        tracing::warn!(dir = %static_dir.display(), "Static directory not found");
    }

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            // Outermost, so request spans record the overridden method.
            .wrap(MethodOverride)
            .app_data(web::Data::new(app_state.clone()))
            .configure(handlers::configure_routes)
            .service(handlers::static_files(static_dir.clone()))
            .default_service(web::to(handlers::not_found))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    state.shutdown().await;
    Ok(())
}
