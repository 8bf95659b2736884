//! Shared HTTP client builder for calls to the meeting platform.

use std::time::Duration;

use crate::error::Error;

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout. `None` leaves the transport default in place.
    pub timeout: Option<Duration>,
    /// User agent string.
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: format!("meeting-auth/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Builder for the `reqwest::Client` shared by the token provider and the
/// platform gateways.
///
/// One client is built per process and cloned into each consumer so they all
/// share a single connection pool.
pub struct HttpClientBuilder {
    config: HttpClientConfig,
}

impl HttpClientBuilder {
    /// Create a new client builder with default configuration.
    pub fn new() -> Self {
        Self {
            config: HttpClientConfig::default(),
        }
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Set the user agent string.
    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.config.user_agent = user_agent;
        self
    }

    /// Build the configured HTTP client.
    pub fn build(self) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .use_rustls_tls()
            .user_agent(self.config.user_agent);

        if let Some(timeout) = self.config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(builder.build()?)
    }
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_default_has_no_timeout() {
        let builder = HttpClientBuilder::new();
        assert_eq!(builder.config.timeout, None);
        assert!(builder.config.user_agent.starts_with("meeting-auth/"));
    }

    #[test]
    fn test_builder_with_timeout() {
        let builder = HttpClientBuilder::new().with_timeout(Duration::from_secs(60));
        assert_eq!(builder.config.timeout, Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_builder_with_user_agent() {
        let builder = HttpClientBuilder::new().with_user_agent("webinars/1.0".to_string());
        assert_eq!(builder.config.user_agent, "webinars/1.0");
    }

    #[tokio::test]
    async fn test_build_client() {
        let result = HttpClientBuilder::new().build();
        assert!(result.is_ok());
    }
}
