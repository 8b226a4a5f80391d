//! maps-mcp: MCP server exposing Google Maps operations over HTTP
//!
//! A thin protocol adapter: requests arrive on a single HTTP endpoint in
//! a JSON-RPC shaped envelope, are validated, forwarded to the Google
//! Maps web APIs, and reshaped into a uniform content envelope. A minimal
//! session concept tracks whether the initialisation handshake happened;
//! it carries no authorisation semantics.
//!
//! # Modules
//!
//! - [`config`] — environment-driven configuration
//! - [`error`] — error types
//! - [`maps`] — Google Maps provider client
//! - [`mcp`] — protocol, dispatcher, session store, HTTP transport

pub mod config;
pub mod error;
pub mod maps;
pub mod mcp;
