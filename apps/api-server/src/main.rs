//! # Agora API Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod state;
mod telemetry;

use config::AppConfig;
use state::AppState;
use telemetry::TelemetryConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    tracing::info!(
        "Starting Agora API Server on {}:{}",
        config.host,
        config.port
    );

    let state = AppState::new(&config).await;
    let db = state.db.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    #[cfg(feature = "postgres")]
    if let Some(db) = db {
        match std::sync::Arc::try_unwrap(db) {
            Ok(db) => {
                if let Err(e) = db.close().await {
                    tracing::warn!(error = %e, "Closing database connections failed");
                }
            }
            Err(_) => tracing::warn!("Database connections still shared, skipping close"),
        }
    }
    #[cfg(not(feature = "postgres"))]
    drop(db);

    Ok(())
}
