//! Google Maps provider client.
//!
//! This module wraps the two Google Maps web APIs the server exposes as
//! tools: the Geocoding API and the Places nearby-search API. The seam is
//! the [`client::MapsProvider`] trait so the dispatcher can be tested
//! against a fake provider without network access.

pub mod client;
pub mod error;
pub mod types;

pub use client::{GoogleMapsClient, MapsProvider, API_KEY_ENV};
pub use error::ProviderError;
pub use types::{GeocodeResult, LatLng, Place};
