use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use stockroom_backend_lib::{
    config::{Settings, DEV_TOKEN_SECRET},
    router::create_router,
    store::MemoryStore,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load()?;

    // RUST_LOG wins over the configured level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(settings.log_level.clone())),
        )
        .init();

    if settings.token_secret == DEV_TOKEN_SECRET {
        tracing::warn!("using the development token secret; set STOCKROOM_TOKEN_SECRET");
    }

    let bind_addr = settings.bind_addr;
    let store = MemoryStore::new();
    let state = Arc::new(AppState::new(store, settings));
    let app = create_router(state);

    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!("listening on {bind_addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
