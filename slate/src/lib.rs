/// CLI arguments for the service
pub mod cli;
/// Process-wide configuration and client selection
pub mod config;
/// Service-level error types
pub mod error;
/// Gallery rebuilt from chain history
pub mod gallery;
/// The mint pipeline: validation, metadata, orchestration
pub mod mint;
/// HTTP server and routes
pub mod server;
/// Utility modules
pub mod utils;

pub use error::{SlateError, SlateResult};

#[cfg(test)]
mod tests;
