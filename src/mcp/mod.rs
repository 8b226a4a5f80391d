//! MCP protocol implementation.
//!
//! - [`protocol`] — JSON-RPC envelope types
//! - [`session`] — in-memory session store
//! - [`server`] — the request dispatcher and tool handlers
//! - [`http`] — the axum transport (`POST /mcp`)

pub mod http;
pub mod protocol;
pub mod server;
pub mod session;
