//! JSON-RPC message types for the HTTP endpoint.
//!
//! The wire contract is a JSON-RPC 2.0 shaped envelope: a request is
//! `{method, params, id}` and a response carries exactly one of `result`
//! or `error` plus the echoed request id. Two deliberate deviations from
//! strict JSON-RPC:
//!
//! - The request `id` may be absent or `null`; it is echoed back verbatim
//!   either way (`"id": null` in the response).
//! - Every failure, regardless of class, uses the single error code
//!   -32603 with a human-readable message.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The MCP protocol version advertised during initialisation.
pub const MCP_PROTOCOL_VERSION: &str = "2024-11-05";

/// Server name for the initialise response.
pub const SERVER_NAME: &str = "maps-mcp";

/// The one error code every failure collapses onto.
pub const INTERNAL_ERROR_CODE: i32 = -32603;

/// A request ID: string or integer when present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    /// Numeric request ID.
    Number(i64),
    /// String request ID.
    String(String),
}

/// A decoded request envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcRequest {
    /// The method to invoke.
    pub method: String,

    /// Method-dependent parameters.
    #[serde(default)]
    pub params: Option<Value>,

    /// Opaque identifier, echoed back unchanged. Absent and `null` are
    /// both legal and both echo as `null`.
    #[serde(default)]
    pub id: Option<RequestId>,
}

/// A success response envelope.
#[derive(Debug, Clone, Serialize)]
pub struct RpcResponse {
    /// Always "2.0".
    pub jsonrpc: &'static str,

    /// The result of the method call.
    pub result: Value,

    /// The request ID this response corresponds to (`null` when the
    /// request carried none).
    pub id: Option<RequestId>,
}

impl RpcResponse {
    /// Creates a success response.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Value is not const-compatible
    pub fn success(id: Option<RequestId>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            result,
            id,
        }
    }
}

/// The error object inside an error envelope.
#[derive(Debug, Clone, Serialize)]
pub struct RpcErrorData {
    /// Always [`INTERNAL_ERROR_CODE`].
    pub code: i32,

    /// Human-readable description of the failure.
    pub message: String,
}

/// An error response envelope.
#[derive(Debug, Clone, Serialize)]
pub struct RpcError {
    /// Always "2.0".
    pub jsonrpc: &'static str,

    /// The error details.
    pub error: RpcErrorData,

    /// The request ID this error corresponds to, `null` when unknown.
    pub id: Option<RequestId>,
}

impl RpcError {
    /// Creates an error envelope with the fixed internal-error code.
    #[must_use]
    pub fn internal(id: Option<RequestId>, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0",
            error: RpcErrorData {
                code: INTERNAL_ERROR_CODE,
                message: message.into(),
            },
            id,
        }
    }
}

/// Parses a request body into a request envelope.
///
/// # Errors
///
/// Returns an error envelope (id `null`) if the body is not a valid
/// request object.
pub fn parse_request(body: &[u8]) -> Result<RpcRequest, RpcError> {
    serde_json::from_slice(body).map_err(|e| RpcError::internal(None, format!("Parse error: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_valid_request() {
        let body = br#"{"method": "initialize", "params": {}, "id": 1}"#;
        let req = parse_request(body).unwrap();
        assert_eq!(req.method, "initialize");
        assert_eq!(req.id, Some(RequestId::Number(1)));
        assert_eq!(req.params, Some(json!({})));
    }

    #[test]
    fn parse_string_id() {
        let body = br#"{"method": "terminate", "id": "abc-123"}"#;
        let req = parse_request(body).unwrap();
        assert_eq!(req.id, Some(RequestId::String("abc-123".to_string())));
        assert!(req.params.is_none());
    }

    #[test]
    fn parse_absent_and_null_id() {
        let req = parse_request(br#"{"method": "initialize"}"#).unwrap();
        assert!(req.id.is_none());

        let req = parse_request(br#"{"method": "initialize", "id": null}"#).unwrap();
        assert!(req.id.is_none());
    }

    #[test]
    fn parse_ignores_jsonrpc_field() {
        // The body contract is {method, params, id}; a jsonrpc tag is
        // tolerated, not required.
        let body = br#"{"jsonrpc": "2.0", "method": "terminate", "id": 2}"#;
        let req = parse_request(body).unwrap();
        assert_eq!(req.method, "terminate");
    }

    #[test]
    fn parse_invalid_json_fails() {
        let err = parse_request(b"not valid json").unwrap_err();
        assert_eq!(err.error.code, INTERNAL_ERROR_CODE);
        assert!(err.id.is_none());
        assert!(err.error.message.starts_with("Parse error"));
    }

    #[test]
    fn parse_missing_method_fails() {
        let err = parse_request(br#"{"id": 1}"#).unwrap_err();
        assert_eq!(err.error.code, INTERNAL_ERROR_CODE);
    }

    #[test]
    fn serialise_success_response() {
        let response = RpcResponse::success(Some(RequestId::Number(1)), json!({"ok": true}));
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains(r#""jsonrpc":"2.0""#));
        assert!(json.contains(r#""id":1"#));
        assert!(json.contains(r#""result":{"ok":true}"#));
    }

    #[test]
    fn serialise_null_id() {
        let response = RpcResponse::success(None, Value::Null);
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains(r#""id":null"#));

        let error = RpcError::internal(None, "boom");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains(r#""id":null"#));
    }

    #[test]
    fn serialise_error_response() {
        let error = RpcError::internal(Some(RequestId::String("r1".to_string())), "Unknown tool: teleport");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains(r#""code":-32603"#));
        assert!(json.contains("Unknown tool: teleport"));
        assert!(json.contains(r#""id":"r1""#));
    }
}
