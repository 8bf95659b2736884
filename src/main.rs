use std::sync::Arc;

use domain::gateway::{oauth::zoom as zoom_oauth, zoom::ZoomClient};
use log::{error, info, warn};
use meeting_auth::http::HttpClientBuilder;
use service::{config::Config, logging::Logger};
use web::AppState;

#[tokio::main]
async fn main() {
    let config = Config::new();
    if let Err(e) = Logger::init_logger(&config) {
        eprintln!("Failed to start logger: {e}");
        std::process::exit(1);
    }

    info!("Starting webinar registration [{}]", config.runtime_env());

    // Outbound Zoom calls carry no deadline of their own.
    let http_client = match HttpClientBuilder::new()
        .with_user_agent(format!("webinar_registration/{}", env!("CARGO_PKG_VERSION")))
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to build HTTP client: {e}");
            std::process::exit(1);
        }
    };

    let token_manager = match zoom_oauth::new_token_manager(&config, http_client.clone()) {
        Ok(manager) => Arc::new(manager),
        Err(e) => {
            error!("Failed to configure Zoom credentials: {e}");
            std::process::exit(1);
        }
    };

    if config.webinar_ids().is_empty() {
        warn!("WEBINAR_IDS is not set; /directory will answer 400 until it is");
    }

    let platform = ZoomClient::new(http_client, config.zoom_api_base_url(), token_manager);
    let app_state = AppState::new(config, Arc::new(platform));

    if let Err(e) = web::init_server(app_state).await {
        error!("Server failed: {e}");
        std::process::exit(1);
    }
}
