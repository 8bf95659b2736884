//! Zoom server-to-server OAuth provider implementation.

use async_trait::async_trait;
use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{oauth_error, token_error, Error, OAuthErrorKind, TokenErrorKind};
use crate::oauth::token::Tokens;
use crate::oauth::ProviderKind;

/// Grant type for Zoom server-to-server OAuth apps.
const GRANT_TYPE: &str = "account_credentials";

/// Raw token endpoint response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: String,
    expires_in: i64,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    scope: Option<String>,
}

/// Zoom OAuth provider.
///
/// Exchanges a Zoom account ID plus the app's client ID and secret for an
/// account-level access token. The client credentials travel as HTTP Basic
/// authentication; the grant type and account ID travel as query parameters.
pub struct Provider {
    account_id: String,
    client_id: String,
    client_secret: SecretString,
    token_url: String,
    http_client: reqwest::Client,
}

impl Provider {
    /// Create a new Zoom OAuth provider.
    ///
    /// # Arguments
    ///
    /// * `account_id` - Zoom account ID
    /// * `client_id` - Zoom OAuth client ID
    /// * `client_secret` - Zoom OAuth client secret
    /// * `token_url` - Token endpoint, normally `https://zoom.us/oauth/token`
    /// * `http_client` - Shared HTTP client
    pub fn new(
        account_id: String,
        client_id: String,
        client_secret: SecretString,
        token_url: String,
        http_client: reqwest::Client,
    ) -> Result<Self, Error> {
        if account_id.is_empty() || client_id.is_empty() || client_secret.expose_secret().is_empty()
        {
            return Err(oauth_error(
                OAuthErrorKind::MissingCredentials,
                "Zoom account ID, client ID and client secret are all required",
            ));
        }

        Ok(Self {
            account_id,
            client_id,
            client_secret,
            token_url,
            http_client,
        })
    }
}

#[async_trait]
impl crate::oauth::Provider for Provider {
    fn provider(&self) -> ProviderKind {
        ProviderKind::Zoom
    }

    async fn request_token(&self) -> Result<Tokens, Error> {
        debug!("Requesting Zoom access token for account {}", self.account_id);

        let issued_at = Utc::now();
        let response = self
            .http_client
            .post(&self.token_url)
            .query(&[
                ("grant_type", GRANT_TYPE),
                ("account_id", self.account_id.as_str()),
            ])
            .basic_auth(&self.client_id, Some(self.client_secret.expose_secret()))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!("Zoom token exchange failed: {} - {}", status, error_text);
            return Err(oauth_error(
                OAuthErrorKind::TokenExchangeFailed,
                &format!("Zoom token endpoint returned {status}: {error_text}"),
            ));
        }

        let body: TokenResponse = response.json().await.map_err(|e| {
            warn!("Failed to parse Zoom token response: {:?}", e);
            Error {
                source: Some(Box::new(e)),
                error_kind: crate::error::ErrorKind::OAuth(OAuthErrorKind::InvalidResponse),
            }
        })?;

        if body.access_token.is_empty() {
            warn!("Zoom token response did not contain an access token");
            return Err(oauth_error(
                OAuthErrorKind::InvalidResponse,
                "Zoom token response did not contain an access token",
            ));
        }

        let mut tokens = Tokens::from_expires_in(
            SecretString::new(body.access_token),
            body.expires_in,
            issued_at,
        )
        .inspect_err(|_| {
            warn!(
                "Zoom token response has an unusable expires_in: {}",
                body.expires_in
            )
        })?;
        if let Some(token_type) = body.token_type {
            tokens.token_type = token_type;
        }
        tokens.scopes = body
            .scope
            .map(|scope| scope.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default();

        if tokens.is_expired_at(issued_at) {
            warn!(
                "Zoom issued a token that expires in {}s, inside the expiry margin",
                body.expires_in
            );
            return Err(token_error(
                TokenErrorKind::Expired,
                "Zoom issued a token that is already inside the expiry margin",
            ));
        }

        debug!("Zoom access token valid until {}", tokens.expires_at);
        Ok(tokens)
    }
}
