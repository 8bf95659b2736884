//! # meeting-auth
//!
//! Authentication against the video meeting platform:
//! - Server-to-server OAuth providers (Zoom account credentials)
//! - Access token caching with lazy, single-flight refresh
//! - HTTP client building shared by the provider and the API gateways
//!
//! ## Architecture
//!
//! This crate provides the authentication foundation that other crates build upon:
//! `domain` gateways ask the token [`Manager`](oauth::token::Manager) for a bearer
//! token before every platform call and never see the client credentials.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use meeting_auth::{
//!     http::HttpClientBuilder,
//!     oauth::{providers::zoom, token::Manager},
//! };
//!
//! let http = HttpClientBuilder::new().build()?;
//! let provider = zoom::Provider::new(account_id, client_id, secret, token_url, http)?;
//! let tokens = Manager::new(provider);
//! let bearer = tokens.get_valid_token().await?;
//! ```

pub mod error;
pub mod http;
pub mod oauth;

// Re-export commonly used types
pub use error::{Error, ErrorKind};
