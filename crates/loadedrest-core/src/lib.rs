//! Configuration and shared error types for LoadedRest.
//!
//! This crate holds the deployment-level settings every other LoadedRest
//! crate reads: whether the protocol is enabled at all, whether developer
//! debug mode is on, and where the server listens.

mod config;
mod error;

pub use config::{LoadedRestConfig, parse_bool_flag};
pub use error::{LoadedRestError, LoadedRestResult};
