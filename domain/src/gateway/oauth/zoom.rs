//! Zoom OAuth client.
//!
//! Provides a configured Zoom server-to-server OAuth provider and token cache.

use crate::error::{config_error, Error};
use log::*;
use meeting_auth::oauth::{providers::zoom::Provider as ZoomProvider, token::Manager};
use secrecy::SecretString;
use service::config::Config;

/// Create a new Zoom OAuth provider from the account credentials in `config`.
///
/// # Returns
///
/// A configured provider, or a `Config` error when any credential is missing.
pub fn new_provider(config: &Config, http_client: reqwest::Client) -> Result<ZoomProvider, Error> {
    let (Some(account_id), Some(client_id), Some(client_secret)) = (
        config.zoom_account_id(),
        config.zoom_client_id(),
        config.zoom_client_secret(),
    ) else {
        error!("Zoom OAuth credentials are not configured");
        return Err(config_error(
            "ZOOM_ACCOUNT_ID, ZOOM_CLIENT_ID and ZOOM_CLIENT_SECRET must be set",
        ));
    };

    Ok(ZoomProvider::new(
        account_id,
        client_id,
        SecretString::new(client_secret),
        config.zoom_oauth_url().to_string(),
        http_client,
    )?)
}

/// Create the process-wide Zoom token cache.
pub fn new_token_manager(
    config: &Config,
    http_client: reqwest::Client,
) -> Result<Manager<ZoomProvider>, Error> {
    Ok(Manager::new(new_provider(config, http_client)?))
}
