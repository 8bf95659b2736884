//! Process-wide access token cache with single-flight refresh.

use chrono::Utc;
use secrecy::SecretString;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use super::Tokens;
use crate::error::Error;
use crate::oauth::Provider;

/// Token manager that caches one application access token and refreshes it lazily.
///
/// A token is only handed out while `now < expires_at`. When it is missing or
/// stale, the caller that notices performs the exchange inline. The refresh lock
/// keeps concurrent callers from each running their own exchange: the first one
/// refreshes, the others wait and then pick up its token.
///
/// A failed exchange leaves the previously cached tokens untouched.
pub struct Manager<P: Provider> {
    provider: P,
    cached: RwLock<Option<Tokens>>,
    refresh_lock: Mutex<()>,
}

impl<P: Provider> Manager<P> {
    /// Create a new token manager with an empty cache.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            cached: RwLock::new(None),
            refresh_lock: Mutex::new(()),
        }
    }

    /// Get a valid access token, exchanging credentials if needed.
    ///
    /// This method:
    /// 1. Returns the cached token if it has not reached its expiry
    /// 2. Otherwise takes the refresh lock
    /// 3. Re-checks the cache (another request might have refreshed it)
    /// 4. Requests a new token from the provider and caches it
    pub async fn get_valid_token(&self) -> Result<SecretString, Error> {
        if let Some(token) = self.cached_token().await {
            return Ok(token);
        }

        debug!(
            "No valid {} token cached, refreshing",
            self.provider.provider().as_str()
        );

        let _guard = self.refresh_lock.lock().await;

        if let Some(token) = self.cached_token().await {
            debug!("Token was refreshed by another request");
            return Ok(token);
        }

        let tokens = self.provider.request_token().await?;
        let access_token = tokens.access_token.clone();
        debug!(
            "Cached new {} token, expires in {}s",
            self.provider.provider().as_str(),
            tokens.time_until_expiry().num_seconds()
        );
        *self.cached.write().await = Some(tokens);

        Ok(access_token)
    }

    /// Replace the cached tokens.
    pub async fn store_tokens(&self, tokens: Tokens) {
        *self.cached.write().await = Some(tokens);
    }

    /// Get the cached tokens (may be expired).
    pub async fn get_tokens(&self) -> Option<Tokens> {
        self.cached.read().await.clone()
    }

    async fn cached_token(&self) -> Option<SecretString> {
        let now = Utc::now();
        self.cached
            .read()
            .await
            .as_ref()
            .filter(|tokens| !tokens.is_expired_at(now))
            .map(|tokens| tokens.access_token.clone())
    }
}
