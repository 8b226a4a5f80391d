//! HTTP transport for the MCP server.
//!
//! A single endpoint, `POST /mcp`, carries the whole protocol. The
//! request body is the `{method, params, id}` envelope; the session token
//! travels in the `Mcp-Session-Id` request header and the resolved token
//! is echoed back in the same response header (and, for `initialize`, in
//! the result payload). Success is HTTP 200, every caught failure is 500.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};

use crate::mcp::protocol::{parse_request, RpcError, RpcResponse};
use crate::mcp::server::McpServer;

/// Request/response header carrying the session token.
pub const SESSION_HEADER: &str = "mcp-session-id";

/// Builds the application router around a dispatcher.
pub fn router(server: Arc<McpServer>) -> Router {
    Router::new()
        .route("/mcp", post(mcp_handler))
        .with_state(server)
}

/// Maps a reply envelope onto the two wire shapes.
fn reply_response(reply: Result<RpcResponse, RpcError>) -> Response {
    match reply {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(error) => (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response(),
    }
}

/// Handles `POST /mcp`.
async fn mcp_handler(
    State(server): State<Arc<McpServer>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let token = headers
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    let request = match parse_request(&body) {
        Ok(request) => request,
        Err(error) => return reply_response(Err(error)),
    };

    let dispatch = server.handle_request(request, token.as_deref()).await;

    let mut response = reply_response(dispatch.reply);
    if let Ok(value) = HeaderValue::from_str(&dispatch.session) {
        response.headers_mut().insert(SESSION_HEADER, value);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use tower::ServiceExt;

    use crate::maps::client::MapsProvider;
    use crate::maps::error::ProviderError;
    use crate::maps::types::{GeocodeResult, LatLng, Place};

    struct NoopProvider;

    #[async_trait]
    impl MapsProvider for NoopProvider {
        async fn geocode(&self, _address: &str) -> Result<Vec<GeocodeResult>, ProviderError> {
            Ok(Vec::new())
        }

        async fn nearby_search(
            &self,
            _location: LatLng,
            _radius: f64,
            _keyword: &str,
        ) -> Result<Vec<Place>, ProviderError> {
            Ok(Vec::new())
        }
    }

    fn test_router() -> Router {
        router(Arc::new(McpServer::new(Arc::new(NoopProvider))))
    }

    #[tokio::test]
    async fn malformed_body_yields_500_with_null_id() {
        let app = test_router();

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .method("POST")
                    .uri("/mcp")
                    .header("content-type", "application/json")
                    .body(axum::body::Body::from("not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], serde_json::json!(-32603));
        assert!(body["id"].is_null());
    }

    #[tokio::test]
    async fn get_on_mcp_is_rejected() {
        let app = test_router();

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .method("GET")
                    .uri("/mcp")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
