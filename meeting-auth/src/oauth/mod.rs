//! OAuth 2.0 authentication infrastructure.
//!
//! Provides server-to-server OAuth for video meeting platforms: a provider that
//! performs the credential exchange and a token manager that caches the result.

mod provider;

pub mod providers;
pub mod token;

pub use provider::{Provider, ProviderKind};
