//! # Quill API Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::{App, HttpServer, web};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod state;
mod telemetry;

#[cfg(test)]
mod test_support;

use config::AppConfig;
use state::AppState;
use telemetry::{TelemetryConfig, init_telemetry};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    tracing::info!(
        "Starting Quill API Server on {}:{}",
        config.host,
        config.port
    );
    tracing::info!(
        upload_dir = %config.upload.dir.display(),
        resize_width = config.upload.resize_width,
        "Upload storage configured"
    );

    let state = AppState::new(&config).await;
    #[cfg(feature = "postgres")]
    let db = state.db.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))
    .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?
    .run()
    .await
    .context("server terminated with an error")?;

    #[cfg(feature = "postgres")]
    if let Some(connections) = db.and_then(std::sync::Arc::into_inner) {
        if let Err(e) = connections.close().await {
            tracing::error!("Failed to close database connections: {}", e);
        }
    }

    tracing::info!("Server stopped");
    Ok(())
}
