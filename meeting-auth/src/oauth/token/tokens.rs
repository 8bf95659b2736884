//! OAuth token types.

use chrono::{DateTime, Duration, Utc};
use secrecy::SecretString;

use crate::error::{oauth_error, Error, OAuthErrorKind};

/// Seconds shaved off the server-reported lifetime of every access token.
///
/// A token is treated as expired this long before the platform would reject it,
/// covering clock skew and requests that are still in flight when it lapses.
pub const EXPIRY_MARGIN_SECS: i64 = 60;

/// OAuth tokens with metadata.
#[derive(Debug, Clone)]
pub struct Tokens {
    /// Access token for API requests.
    pub access_token: SecretString,
    /// Instant after which the access token must no longer be handed out.
    /// Already includes [`EXPIRY_MARGIN_SECS`].
    pub expires_at: DateTime<Utc>,
    /// Token type (usually "bearer").
    pub token_type: String,
    /// Granted scopes.
    pub scopes: Vec<String>,
}

impl Tokens {
    /// Build tokens from a token endpoint response received at `issued_at`.
    ///
    /// `expires_in` is the lifetime in seconds reported by the server. A lifetime
    /// that does not fit in a timestamp is an `InvalidResponse`.
    pub fn from_expires_in(
        access_token: SecretString,
        expires_in: i64,
        issued_at: DateTime<Utc>,
    ) -> Result<Self, Error> {
        let expires_at = expires_in
            .checked_sub(EXPIRY_MARGIN_SECS)
            .and_then(Duration::try_seconds)
            .and_then(|lifetime| issued_at.checked_add_signed(lifetime))
            .ok_or_else(|| {
                oauth_error(
                    OAuthErrorKind::InvalidResponse,
                    &format!("Token lifetime of {expires_in}s is out of range"),
                )
            })?;

        Ok(Self {
            access_token,
            expires_at,
            token_type: "bearer".to_string(),
            scopes: vec![],
        })
    }

    /// Check if the access token is expired or inside the expiry margin.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Same as [`Tokens::is_expired`] against an explicit instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Get the remaining time until expiration.
    pub fn time_until_expiry(&self) -> Duration {
        self.expires_at - Utc::now()
    }
}
