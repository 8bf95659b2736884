//! OAuth provider trait and types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::token::Tokens;
use crate::error::Error;

/// Known OAuth providers for video meetings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    Zoom,
}

impl ProviderKind {
    /// Get the provider identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Zoom => "zoom",
        }
    }
}

/// Trait for OAuth 2.0 providers that issue tokens for the application itself,
/// with no end user in the loop (client credentials style grants).
///
/// The token [`Manager`](super::token::Manager) calls [`Provider::request_token`]
/// whenever its cached token is missing or stale.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Get the provider kind.
    fn provider(&self) -> ProviderKind;

    /// Exchange the configured application credentials for a new access token.
    ///
    /// # Returns
    ///
    /// Tokens whose `expires_at` already accounts for the expiry margin.
    async fn request_token(&self) -> Result<Tokens, Error>;
}
