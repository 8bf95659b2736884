//! Webinar directory and registration logic.
//!
//! `web` calls the operations in [`webinar`] and [`registration`], which talk to
//! the meeting platform through the [`gateway::WebinarPlatform`] trait.

/// Platform-assigned webinar identifier.
pub type WebinarId = u64;

pub mod error;
pub mod gateway;
pub mod registration;
pub mod webinar;
