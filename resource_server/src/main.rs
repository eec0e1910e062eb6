//! Resource server: connects to PostgreSQL from `DB_*` env vars, ensures the `resources`
//! table exists, and serves the resource API with health/readiness routes.
//!
//! Run from repo root: `cargo run -p resource-server`

use resource_service::{
    build_app, common_routes_with_ready, resource_routes, AppState, ConnectionProvider, DatabaseSettings,
    PgResourceStore, ServerSettings,
};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("resource_service=info,tower_http=info")),
        )
        .init();

    let database = DatabaseSettings::from_env()?;
    let settings = ServerSettings::from_env()?;

    let provider = ConnectionProvider::connect(&database.connection_string, settings.max_connections).await?;
    provider.seed().await?;

    let state = AppState::new(Arc::new(PgResourceStore::new(provider.clone())));
    let api = axum::Router::new()
        .merge(common_routes_with_ready(provider.clone()))
        .merge(resource_routes(state));
    let app = build_app(api, &settings);

    let listener = TcpListener::bind(&settings.listen_addr).await?;
    tracing::info!("listening for requests at http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    provider.close().await;
    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
