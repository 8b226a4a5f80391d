//! Request dispatcher for the maps MCP server.
//!
//! This is the entire functional surface: one dispatcher routing on a
//! method name, and two leaf tool handlers that validate parameters,
//! call the external mapping provider, and reshape the answer into a
//! uniform content envelope.
//!
//! # Contract
//!
//! No failure escapes [`McpServer::handle_request`] as a panic or a bare
//! error: every failure class (validation, unknown tool, unknown method,
//! provider failure) is converted to the same error envelope with code
//! -32603, and the transport layer turns that into an HTTP 500.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::{error, info};

use crate::error::DispatchError;
use crate::maps::client::MapsProvider;
use crate::maps::types::{LatLng, Place};
use crate::mcp::protocol::{
    RpcError, RpcRequest, RpcResponse, MCP_PROTOCOL_VERSION, SERVER_NAME,
};
use crate::mcp::session::SessionStore;

/// Search radius applied when a places-search request omits `radius`.
pub const DEFAULT_RADIUS_METERS: f64 = 5000.0;

/// Server information for the initialise response.
#[derive(Debug, Clone, Serialize)]
pub struct ServerInfo {
    /// Server name.
    pub name: String,
    /// Server version.
    pub version: String,
}

impl Default for ServerInfo {
    fn default() -> Self {
        Self {
            name: SERVER_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// A tool definition advertised in the initialise response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    /// Unique tool name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// JSON Schema for the tool's parameters.
    pub input_schema: Value,
}

/// Parameters for the `callTool` method.
#[derive(Debug, Clone, Deserialize)]
struct ToolCallParams {
    /// Name of the tool to call.
    name: String,
    /// Tool-specific parameters.
    #[serde(default)]
    parameters: Value,
}

/// Parameters for the `geocode` tool.
#[derive(Debug, Clone, Deserialize)]
struct GeocodeParams {
    /// Address to resolve.
    address: String,
}

/// Parameters for the `places-search` tool.
#[derive(Debug, Clone, Deserialize)]
struct PlacesSearchParams {
    /// Keyword to search for.
    query: String,
    /// Centre of the search; defaults to the origin when omitted.
    #[serde(default)]
    location: Option<LatLng>,
    /// Search radius in metres; defaults to [`DEFAULT_RADIUS_METERS`].
    #[serde(default)]
    radius: Option<f64>,
}

/// Result of dispatching one request.
#[derive(Debug)]
pub struct Dispatch {
    /// The session token resolved for this request (freshly generated
    /// when the caller supplied none, or an unknown one).
    pub session: String,
    /// The reply envelope: success maps to HTTP 200, failure to 500.
    pub reply: Result<RpcResponse, RpcError>,
}

/// The maps MCP request dispatcher.
pub struct McpServer {
    sessions: SessionStore,
    provider: Arc<dyn MapsProvider>,
}

impl McpServer {
    /// Creates a dispatcher around the given provider.
    #[must_use]
    pub fn new(provider: Arc<dyn MapsProvider>) -> Self {
        Self {
            sessions: SessionStore::new(),
            provider,
        }
    }

    /// The session store owned by this dispatcher.
    #[must_use]
    pub const fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Handles one decoded request envelope.
    ///
    /// Session resolution happens unconditionally, for every method: an
    /// absent or unknown token gets a fresh uninitialised session before
    /// routing. `terminate` then deletes whatever record the resolution
    /// produced, so terminating a never-seen token is a harmless no-op.
    pub async fn handle_request(&self, req: RpcRequest, session_token: Option<&str>) -> Dispatch {
        let session = self.sessions.resolve(session_token);

        info!(method = %req.method, session = %session, "dispatching request");

        let result = match req.method.as_str() {
            "initialize" => Ok(self.handle_initialize(&session)),
            "callTool" => self.handle_call_tool(req.params).await,
            "terminate" => {
                self.sessions.remove(&session);
                Ok(Value::Null)
            }
            other => Err(DispatchError::UnknownMethod(other.to_string())),
        };

        let reply = match result {
            Ok(value) => Ok(RpcResponse::success(req.id, value)),
            Err(e) => {
                error!(method = %req.method, session = %session, error = %e, "request failed");
                Err(RpcError::internal(req.id, e.to_string()))
            }
        };

        Dispatch { session, reply }
    }

    /// Marks the session initialised and advertises the server identity,
    /// the resolved session token, and the static tool list.
    fn handle_initialize(&self, session: &str) -> Value {
        self.sessions.mark_initialized(session);

        json!({
            "protocolVersion": MCP_PROTOCOL_VERSION,
            "serverInfo": ServerInfo::default(),
            "sessionId": session,
            "tools": tool_definitions(),
        })
    }

    /// Routes a `callTool` request to the matching tool handler.
    async fn handle_call_tool(&self, params: Option<Value>) -> Result<Value, DispatchError> {
        let params: ToolCallParams = params
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| DispatchError::Validation(format!("Invalid callTool params: {e}")))?
            .ok_or_else(|| DispatchError::Validation("Missing callTool params".to_string()))?;

        match params.name.as_str() {
            "geocode" => self.call_geocode(params.parameters).await,
            "places-search" => self.call_places_search(params.parameters).await,
            other => Err(DispatchError::UnknownTool(other.to_string())),
        }
    }

    /// The `geocode` tool: resolve an address to coordinates.
    async fn call_geocode(&self, parameters: Value) -> Result<Value, DispatchError> {
        let params: GeocodeParams = serde_json::from_value(parameters)
            .map_err(|e| DispatchError::Validation(format!("Invalid geocode parameters: {e}")))?;

        if params.address.trim().is_empty() {
            return Err(DispatchError::Validation(
                "geocode requires a non-empty address".to_string(),
            ));
        }

        let results = self.provider.geocode(&params.address).await?;
        let first = results.into_iter().next().ok_or(DispatchError::NoResults)?;

        Ok(tool_content(
            format!("Found location: {}", first.formatted_address),
            json!({
                "location": first.geometry.location,
                "formatted_address": first.formatted_address,
                "place_id": first.place_id,
            }),
        ))
    }

    /// The `places-search` tool: keyword search around a coordinate.
    async fn call_places_search(&self, parameters: Value) -> Result<Value, DispatchError> {
        let params: PlacesSearchParams = serde_json::from_value(parameters).map_err(|e| {
            DispatchError::Validation(format!("Invalid places-search parameters: {e}"))
        })?;

        // Documented defaults, not errors: searches without a location
        // centre on the origin, searches without a radius use 5 km.
        let location = params.location.unwrap_or(LatLng::ZERO);
        let radius = params.radius.unwrap_or(DEFAULT_RADIUS_METERS);

        let places = self
            .provider
            .nearby_search(location, radius, &params.query)
            .await?;

        let records: Vec<Value> = places.iter().map(place_record).collect();

        Ok(tool_content(
            format!("Found {} places", records.len()),
            Value::Array(records),
        ))
    }
}

/// Builds the uniform two-part content envelope every tool returns: a
/// text summary followed by a structured payload.
fn tool_content(text: String, data: Value) -> Value {
    json!({
        "content": [
            { "type": "text", "text": text },
            { "type": "json", "data": data }
        ]
    })
}

/// Reshapes one provider place into the wire record. `location` is
/// omitted entirely when the provider omitted geometry.
fn place_record(place: &Place) -> Value {
    let mut record = Map::new();
    record.insert("name".to_string(), json!(place.name));
    if let Some(geometry) = place.geometry {
        record.insert("location".to_string(), json!(geometry.location));
    }
    record.insert("place_id".to_string(), json!(place.place_id));
    record.insert("types".to_string(), json!(place.types));
    record.insert("vicinity".to_string(), json!(place.vicinity));
    Value::Object(record)
}

/// Returns the static list of tool descriptors. Defined at startup,
/// never mutated.
#[must_use]
pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: "geocode".to_string(),
            description: "Convert a street address into geographic coordinates using the \
                          Google Maps Geocoding API. Returns the location, formatted \
                          address and place ID of the best match."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "address": {
                        "type": "string",
                        "description": "Address to geocode"
                    }
                },
                "required": ["address"]
            }),
        },
        ToolDefinition {
            name: "places-search".to_string(),
            description: "Search for places near a location using the Google Places API. \
                          Location defaults to {lat: 0, lng: 0} and radius to 5000 metres \
                          when omitted."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Keyword to search for"
                    },
                    "location": {
                        "type": "object",
                        "properties": {
                            "lat": { "type": "number" },
                            "lng": { "type": "number" }
                        },
                        "description": "Optional: centre of the search"
                    },
                    "radius": {
                        "type": "number",
                        "description": "Optional: search radius in metres (default: 5000)"
                    }
                },
                "required": ["query"]
            }),
        },
    ]
}
