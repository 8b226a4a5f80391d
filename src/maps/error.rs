//! Error types for the Google Maps provider client.

use thiserror::Error;

/// Errors that can occur while calling the external mapping provider.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The provider credential is missing from the process environment.
    #[error("GOOGLE_MAPS_API_KEY is not set")]
    MissingApiKey,

    /// The HTTP request itself failed (connect, timeout, decode).
    #[error("provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success API status.
    #[error("provider returned status {status}: {}", message.as_deref().unwrap_or("no details"))]
    Status {
        /// The `status` field of the provider response.
        status: String,
        /// The provider's `error_message`, when present.
        message: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_display() {
        let msg = ProviderError::MissingApiKey.to_string();
        assert!(msg.contains("GOOGLE_MAPS_API_KEY"));
    }

    #[test]
    fn status_display_includes_status_and_message() {
        let error = ProviderError::Status {
            status: "REQUEST_DENIED".to_string(),
            message: Some("The provided API key is invalid.".to_string()),
        };
        let msg = error.to_string();
        assert!(msg.contains("REQUEST_DENIED"));
        assert!(msg.contains("invalid"));
    }

    #[test]
    fn status_display_without_message() {
        let error = ProviderError::Status {
            status: "UNKNOWN_ERROR".to_string(),
            message: None,
        };
        assert!(error.to_string().contains("no details"));
    }
}
