//! Data types for the Google Maps web APIs.
//!
//! The deserialisation structs match the JSON the Geocoding and Places
//! nearby-search endpoints return; only the fields the tools surface are
//! kept. Unknown fields are ignored.

use serde::{Deserialize, Serialize};

/// A geographic coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl LatLng {
    /// The origin coordinate, used as the documented default when a
    /// places-search request omits `location`.
    pub const ZERO: Self = Self { lat: 0.0, lng: 0.0 };
}

impl std::fmt::Display for LatLng {
    /// Formats as `lat,lng`, the form the Places API expects in its
    /// `location` query parameter.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// Geometry block shared by both APIs.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Geometry {
    /// The resolved coordinate.
    pub location: LatLng,
}

/// One result from the Geocoding API.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResult {
    /// Human-readable address.
    pub formatted_address: String,
    /// Location geometry.
    pub geometry: Geometry,
    /// Stable identifier for the place.
    pub place_id: String,
}

/// One result from the Places nearby-search API.
#[derive(Debug, Clone, Deserialize)]
pub struct Place {
    /// Display name of the place.
    pub name: String,
    /// Location geometry; the provider omits it for some records.
    #[serde(default)]
    pub geometry: Option<Geometry>,
    /// Stable identifier for the place.
    pub place_id: String,
    /// Category tags.
    #[serde(default)]
    pub types: Vec<String>,
    /// Simplified nearby address.
    #[serde(default)]
    pub vicinity: Option<String>,
}

/// Wire shape of a Geocoding API response.
#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    /// API status code (`OK`, `ZERO_RESULTS`, ...).
    pub status: String,
    /// Result list, empty on `ZERO_RESULTS`.
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
    /// Extra detail the API attaches to failure statuses.
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Wire shape of a Places nearby-search response.
#[derive(Debug, Deserialize)]
pub struct PlacesResponse {
    /// API status code (`OK`, `ZERO_RESULTS`, ...).
    pub status: String,
    /// Result list, empty on `ZERO_RESULTS`.
    #[serde(default)]
    pub results: Vec<Place>,
    /// Extra detail the API attaches to failure statuses.
    #[serde(default)]
    pub error_message: Option<String>,
}
