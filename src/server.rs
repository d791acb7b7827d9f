use axum::{
    Extension, Router,
    routing::{get, post},
};
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tracing::info;

use crate::{
    api,
    error::{PlaylistError, Result},
    qqmusic::QqMusic,
};

pub fn router(client: Arc<QqMusic>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/songlist", post(api::songlist).layer(Extension(client)))
}

pub async fn start_api_server(addr: &str, client: Arc<QqMusic>) -> Result<()> {
    let addr = SocketAddr::from_str(addr)
        .map_err(|e| PlaylistError::Config(format!("invalid server address {addr}: {e}")))?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "listening");
    axum::serve(listener, router(client)).await?;
    Ok(())
}
