//! OAuth access token caching with lazy refresh.

mod manager;
mod tokens;

pub use manager::Manager;
pub use tokens::{Tokens, EXPIRY_MARGIN_SECS};
