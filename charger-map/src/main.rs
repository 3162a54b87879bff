use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use charger_map::config::AppConfig;
use charger_map::pipeline::refresher::{refresh_logged, spawn_periodic};
use charger_map::pipeline::{FeatureStore, Pipeline};
use charger_map::sites::SiteClient;
use charger_map::web::{AppState, CircleLayerStyle, create_router};

#[tokio::main]
async fn main() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = AppConfig::from_env().expect("Invalid configuration");

    let client = SiteClient::new(config.client_config()).expect("Failed to create site client");
    let store = FeatureStore::new();
    let pipeline = Arc::new(Pipeline::new(client, store.clone()));

    // Serve immediately; the map shows an empty collection until the
    // first fetch lands.
    let startup = Arc::clone(&pipeline);
    tokio::spawn(async move {
        refresh_logged(&startup).await;
    });

    if let Some(period) = config.refresh_interval {
        spawn_periodic(Arc::clone(&pipeline), period);
    }

    let state = AppState::new(store, CircleLayerStyle::default());
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind listener");
    info!("V3 supercharger map listening on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
