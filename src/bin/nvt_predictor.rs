use anyhow::Context;
use axum_server::Handle;
use nvt_predictor::logging::init_logging;
use nvt_predictor::{server, AppState, CoingeckoClient, Config};
use std::time::Duration;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;
    init_logging();

    if config.api_key.is_none() {
        warn!("COINGECKO_API_KEY is not set, requests are sent without an API key");
    }
    info!("CoinGecko base URL: {}", config.coingecko_base);

    let state = AppState::new(CoingeckoClient::new(
        config.coingecko_base.clone(),
        config.api_key.clone(),
    ));

    let handle = Handle::new();
    let shutdown = handle.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutting down");
            shutdown.graceful_shutdown(Some(Duration::from_secs(5)));
        }
    });

    server::serve(config.bind_addr, state, handle)
        .await
        .context("server error")
}
