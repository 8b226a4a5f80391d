//! Configuration loading from the process environment.
//!
//! The server is configured entirely through environment variables; there
//! is no configuration file. The Google Maps API key is deliberately NOT
//! part of [`Config`]: it is read from the environment at provider-call
//! time so a missing key surfaces as a per-request failure rather than a
//! startup failure.
//!
//! # Environment Variables
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `PORT` | `8080` | TCP port the HTTP server listens on |
//! | `RUST_LOG` | — | tracing filter directives (standard `EnvFilter`) |
//! | `GOOGLE_MAPS_API_KEY` | — | provider credential, read per request |

use std::env;

use crate::error::ConfigError;

/// Default listening port when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 8080;

/// Environment variable naming the listening port.
pub const PORT_ENV: &str = "PORT";

/// Runtime configuration resolved from the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// TCP port the HTTP server binds.
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self { port: DEFAULT_PORT }
    }
}

impl Config {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` is set but is not a valid TCP port.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match env::var(PORT_ENV) {
            Ok(raw) => parse_port(&raw)?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self { port })
    }
}

/// Parses a port number from an environment variable value.
fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::Invalid {
        name: PORT_ENV,
        message: format!("expected a TCP port number, got '{raw}'"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_port_is_8080() {
        assert_eq!(Config::default().port, 8080);
    }

    #[test]
    fn parse_valid_port() {
        assert_eq!(parse_port("3000").unwrap(), 3000);
    }

    #[test]
    fn parse_port_trims_whitespace() {
        assert_eq!(parse_port(" 8081 ").unwrap(), 8081);
    }

    #[test]
    fn reject_non_numeric_port() {
        let err = parse_port("not-a-port").unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn reject_out_of_range_port() {
        assert!(parse_port("70000").is_err());
    }
}
