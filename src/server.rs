//! Router construction and the HTTP listener.

use crate::handlers::{predict, AppState};
use axum::http::Method;
use axum::routing::get;
use axum::Router;
use axum_server::Handle;
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_headers(Any)
        .allow_origin(Any);

    Router::new()
        .route("/predict/{token}", get(predict))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Serve until `handle` is shut down.
pub async fn serve(addr: SocketAddr, state: AppState, handle: Handle) -> anyhow::Result<()> {
    info!("Listening on http://{}", addr);
    axum_server::bind(addr)
        .handle(handle)
        .serve(router(state).into_make_service())
        .await?;
    Ok(())
}
