//! Configuration module for environment variable parsing.
//!
//! Reads all configuration from environment variables. Invalid values fall
//! back to defaults with a logged warning rather than failing startup.

use std::env;
use tracing::warn;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the web server to listen on
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Config {
            port: parse_port("PORT", 8080),
        }
    }
}

/// Parse a port number, falling back to the default on missing or
/// unparseable values.
fn parse_port(name: &str, default: u16) -> u16 {
    let raw = match env::var(name) {
        Ok(v) => v,
        Err(_) => return default,
    };

    match raw.trim().parse::<u16>() {
        Ok(port) => port,
        Err(_) => {
            warn!(env_var = name, value = %raw, "Invalid port value, using default");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_port_valid() {
        env::set_var("TEST_PORT", "9090");
        let result = parse_port("TEST_PORT", 8080);
        assert_eq!(result, 9090);
        env::remove_var("TEST_PORT");
    }

    #[test]
    fn test_parse_port_default() {
        let result = parse_port("NONEXISTENT_PORT_VAR", 8080);
        assert_eq!(result, 8080);
    }

    #[test]
    fn test_parse_port_invalid() {
        env::set_var("TEST_PORT_INVALID", "not-a-port");
        let result = parse_port("TEST_PORT_INVALID", 8080);
        assert_eq!(result, 8080);
        env::remove_var("TEST_PORT_INVALID");
    }
}
