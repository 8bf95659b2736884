//! HTTP surface of the webinar registration service.
//!
//! Serves the webinar directory, registration submission and the static
//! registration page over one axum router.

use std::sync::Arc;

use axum::http::{header::CONTENT_TYPE, HeaderValue, Method};
use domain::gateway::WebinarPlatform;
use log::*;
use service::config::Config;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::CorsLayer;

mod controller;
pub mod error;
mod extractors;
pub mod router;

pub use error::{Error, Result};

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub platform: Arc<dyn WebinarPlatform>,
}

impl AppState {
    pub fn new(config: Config, platform: Arc<dyn WebinarPlatform>) -> Self {
        Self { config, platform }
    }
}

pub async fn init_server(app_state: AppState) -> std::io::Result<()> {
    let host = app_state
        .config
        .interface
        .clone()
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let server_url = format!("{host}:{}", app_state.config.port);
    let listener = TcpListener::bind(&server_url).await?;

    let cors = cors_layer(&app_state.config);

    info!("Server starting... listening for connections on http://{server_url}");

    let app = router::define_routes(app_state).layer(cors);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid allowed origin: {origin}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE])
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {err}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!("Failed to install terminate handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received terminate signal, shutting down"),
    }
}
