use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes;
use crate::state::AppState;
use service::{
    file::{ContactStore, RateStore},
    runtime,
    storage::aggregate_file::AggregateFile,
    ResourceService, ResourceStore,
};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Open the resource store and its collaborators as configured.
pub async fn build_state(cfg: &AppConfig) -> anyhow::Result<AppState> {
    let storage = Arc::new(AggregateFile::new(&cfg.storage.data_dir, &cfg.storage.prefix, cfg.storage.persistent));
    let store = ResourceStore::open(storage).await?;
    let contacts = ContactStore::new(cfg.storage.contacts_path()).await?;
    let rates = RateStore::new(cfg.storage.rates_path()).await?;
    Ok(AppState {
        service: ResourceService::new(store, contacts, rates),
        default_principal: cfg.service.default_principal.clone(),
        default_page_size: cfg.service.default_page_size,
    })
}

pub fn build_app(state: AppState) -> Router {
    routes::build_router(state, build_cors())
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    let cfg = AppConfig::load_or_default()?;

    runtime::ensure_env(&cfg.storage.data_dir, &cfg.storage.prefix).await?;
    let state = build_state(&cfg).await?;
    let app = build_app(state);

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!(%addr, data_dir = %cfg.storage.data_dir, prefix = %cfg.storage.prefix, "starting resource server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
