//! Tenants API - REST server

use axum::Extension;
use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::{connect_from_config_with_retry, run_migrations};
use migration::Migrator;
use tokio_util::sync::CancellationToken;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!(app = config.app.name, version = config.app.version, "Starting");

    let db = connect_from_config_with_retry(config.database.clone(), None).await?;
    run_migrations::<Migrator>(&db, config.app.name).await?;

    let state = AppState { db };

    // Cancelled on shutdown; every request derives its token from it.
    let root_cancel = CancellationToken::new();

    let api_routes = api::routes(&state);
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes).await?;
    let app = router
        .merge(health_router(config.app))
        .merge(api::health::router(state.clone()))
        .layer(Extension(root_cancel.clone()));

    info!("Listening for tenant requests on port {}", config.server.port);

    let db = state.db;
    create_production_app(app, &config.server, async move {
        root_cancel.cancel();
        info!("Shutting down: closing PostgreSQL pool");
        if let Err(e) = db.close().await {
            tracing::warn!(error = %e, "Failed to close PostgreSQL pool cleanly");
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Tenants API shutdown complete");
    Ok(())
}
