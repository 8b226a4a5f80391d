//! HTTP client for the Google Maps web APIs.
//!
//! The [`MapsProvider`] trait is the seam between the dispatcher and the
//! external provider: production code uses [`GoogleMapsClient`], tests
//! inject a fake. The API key is read from the environment on every call,
//! never cached, so a missing or rotated key takes effect per request.

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::maps::error::ProviderError;
use crate::maps::types::{GeocodeResponse, GeocodeResult, LatLng, Place, PlacesResponse};

/// Environment variable holding the provider credential.
pub const API_KEY_ENV: &str = "GOOGLE_MAPS_API_KEY";

const GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";
const NEARBY_SEARCH_URL: &str = "https://maps.googleapis.com/maps/api/place/nearbysearch/json";

/// External mapping provider capabilities used by the tool handlers.
#[async_trait]
pub trait MapsProvider: Send + Sync {
    /// Resolves an address to geographic coordinates.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider call fails or is rejected.
    async fn geocode(&self, address: &str) -> Result<Vec<GeocodeResult>, ProviderError>;

    /// Searches for places near a coordinate matching a keyword.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider call fails or is rejected.
    async fn nearby_search(
        &self,
        location: LatLng,
        radius: f64,
        keyword: &str,
    ) -> Result<Vec<Place>, ProviderError>;
}

/// Google Maps implementation of [`MapsProvider`].
pub struct GoogleMapsClient {
    http: reqwest::Client,
}

impl GoogleMapsClient {
    /// Creates a client with a 30-second timeout and a crate-identifying
    /// user agent.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new() -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(user_agent())
            .build()?;

        Ok(Self { http })
    }

    /// Reads the provider credential from the environment.
    ///
    /// Called once per provider request: absence of the key is a
    /// per-request failure, not a startup failure.
    fn api_key() -> Result<String, ProviderError> {
        env::var(API_KEY_ENV).map_err(|_| ProviderError::MissingApiKey)
    }
}

#[async_trait]
impl MapsProvider for GoogleMapsClient {
    async fn geocode(&self, address: &str) -> Result<Vec<GeocodeResult>, ProviderError> {
        let key = Self::api_key()?;

        debug!(address, "calling geocoding API");

        let response: GeocodeResponse = self
            .http
            .get(GEOCODE_URL)
            .query(&[("address", address), ("key", key.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        check_status(response.status, response.error_message)?;
        Ok(response.results)
    }

    async fn nearby_search(
        &self,
        location: LatLng,
        radius: f64,
        keyword: &str,
    ) -> Result<Vec<Place>, ProviderError> {
        let key = Self::api_key()?;

        debug!(%location, radius, keyword, "calling nearby-search API");

        let response: PlacesResponse = self
            .http
            .get(NEARBY_SEARCH_URL)
            .query(&[
                ("location", location.to_string()),
                ("radius", radius.to_string()),
                ("keyword", keyword.to_string()),
                ("key", key),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        check_status(response.status, response.error_message)?;
        Ok(response.results)
    }
}

fn user_agent() -> String {
    format!(
        "maps-mcp/{version} ({repo})",
        version = env!("CARGO_PKG_VERSION"),
        repo = env!("CARGO_PKG_REPOSITORY"),
    )
}

/// Maps the provider's `status` field onto our error type.
///
/// `OK` and `ZERO_RESULTS` both yield the (possibly empty) result list;
/// everything else is a provider failure.
fn check_status(status: String, message: Option<String>) -> Result<(), ProviderError> {
    match status.as_str() {
        "OK" | "ZERO_RESULTS" => Ok(()),
        _ => Err(ProviderError::Status { status, message }),
    }
}
