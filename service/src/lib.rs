//! Infrastructure shared by every layer: command line / environment
//! configuration and console logging.

pub mod config;
pub mod logging;
