//! Error types for maps-mcp.
//!
//! Every failure class that can surface from a request (validation,
//! unknown tool, unknown method, provider failure) is carried in
//! [`DispatchError`] and collapsed onto a single JSON-RPC error shape at
//! the dispatcher boundary. No error crosses a component boundary as a
//! panic.

use thiserror::Error;

use crate::maps::error::ProviderError;

/// Errors that can occur while reading configuration from the environment.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An environment variable was present but could not be parsed.
    #[error("invalid value for {name}: {message}")]
    Invalid {
        /// Name of the environment variable.
        name: &'static str,
        /// Description of what was wrong with the value.
        message: String,
    },
}

/// Errors produced while dispatching a request.
///
/// All variants are converted to the same wire shape (code -32603) by the
/// dispatcher; the distinction here exists for logging and tests, not for
/// the caller.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// Tool parameters failed schema validation.
    #[error("{0}")]
    Validation(String),

    /// `callTool` named a tool outside the static set.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Top-level `method` is not one of the recognised values.
    #[error("Unknown method: {0}")]
    UnknownMethod(String),

    /// The geocoding provider returned zero results.
    #[error("No results found")]
    NoResults,

    /// The external mapping provider call failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}
