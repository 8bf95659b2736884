//! Clients for the external video meeting platform.

use crate::error::Error;
use crate::registration::{RegistrationRequest, RegistrationResult};
use crate::webinar::WebinarSummary;
use crate::WebinarId;
use async_trait::async_trait;

pub mod oauth;
pub mod zoom;

/// What the registration flow needs from a webinar platform.
///
/// `web` holds this as a trait object so handlers can be exercised against an
/// in-memory platform.
#[async_trait]
pub trait WebinarPlatform: Send + Sync {
    /// Fetch the directory entry of every webinar in `ids`, in the same order.
    ///
    /// Fails fast: the first lookup that answers with a non-success status
    /// fails the whole listing and no partial result is returned. An empty
    /// `ids` is a configuration error and makes no calls.
    async fn list_webinars(&self, ids: &[WebinarId]) -> Result<Vec<WebinarSummary>, Error>;

    /// Submit one registrant for one webinar occurrence.
    async fn register(&self, request: &RegistrationRequest) -> Result<RegistrationResult, Error>;
}
