//! JSON HTTP API for the recipe catalog.

mod handlers;
mod routes;
mod types;

pub use handlers::{ApiError, AppState};
pub use routes::{create_router, MAX_UPLOAD_BYTES};
pub use types::*;

use axum::http::Method;
use log::info;
use std::error::Error;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::config::SiteConfig;

/// Build the application from configuration and serve it until Ctrl-C
pub async fn serve(config: SiteConfig) -> Result<(), Box<dyn Error + Send + Sync>> {
    let addr: SocketAddr = config
        .server
        .listen_addr
        .parse()
        .map_err(|e| format!("Invalid listen address {}: {}", config.server.listen_addr, e))?;

    let state = AppState::from_config(&config)?;
    let mut app = create_router(state);

    if config.server.cors_enabled {
        let cors = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
            .allow_origin(Any);
        app = app.layer(cors);
    }

    let listener = TcpListener::bind(&addr).await?;
    info!("Recipe API listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Recipe API shutting down");
        })
        .await?;

    Ok(())
}
