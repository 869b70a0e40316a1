//! Server configuration.
//!
//! Read from `TRANSIT_*` environment variables at startup, with defaults
//! suitable for running from the crate directory.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::cache::CacheConfig;
use crate::network::EdgePolicy;

/// Default WhatsApp number for the contact redirect.
const DEFAULT_CONTACT_NUMBER: &str = "5511997677030";

/// Errors from reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed
    #[error("invalid value for {name}: {value:?} ({reason})")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Configuration for the HTTP server and its data sources.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on.
    pub bind_addr: SocketAddr,

    /// Path to the station dataset (JSON array of station records).
    pub stations_path: PathBuf,

    /// Path to the user store file.
    pub users_path: PathBuf,

    /// Directory served for the front-end.
    pub static_dir: PathBuf,

    /// How the dataset's neighbor lists are interpreted.
    pub edge_policy: EdgePolicy,

    /// Number the contact page redirects to.
    pub contact_number: String,

    /// Route cache settings.
    pub cache: CacheConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            stations_path: PathBuf::from("data/stations.json"),
            users_path: PathBuf::from("data/users.json"),
            static_dir: PathBuf::from("static"),
            edge_policy: EdgePolicy::AsStored,
            contact_number: DEFAULT_CONTACT_NUMBER.to_string(),
            cache: CacheConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Build a config from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    ///
    /// Unset variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup("TRANSIT_BIND_ADDR") {
            config.bind_addr = value.parse().map_err(|e: std::net::AddrParseError| {
                ConfigError::Invalid {
                    name: "TRANSIT_BIND_ADDR",
                    value: value.clone(),
                    reason: e.to_string(),
                }
            })?;
        }

        if let Some(value) = lookup("TRANSIT_STATIONS_PATH") {
            config.stations_path = PathBuf::from(value);
        }

        if let Some(value) = lookup("TRANSIT_USERS_PATH") {
            config.users_path = PathBuf::from(value);
        }

        if let Some(value) = lookup("TRANSIT_STATIC_DIR") {
            config.static_dir = PathBuf::from(value);
        }

        if let Some(value) = lookup("TRANSIT_SYMMETRIC_EDGES") {
            config.edge_policy = match parse_bool(&value) {
                Some(true) => EdgePolicy::Symmetrize,
                Some(false) => EdgePolicy::AsStored,
                None => {
                    return Err(ConfigError::Invalid {
                        name: "TRANSIT_SYMMETRIC_EDGES",
                        value,
                        reason: "expected true or false".to_string(),
                    });
                }
            };
        }

        if let Some(value) = lookup("TRANSIT_CONTACT_NUMBER") {
            if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
                return Err(ConfigError::Invalid {
                    name: "TRANSIT_CONTACT_NUMBER",
                    value,
                    reason: "expected digits only".to_string(),
                });
            }
            config.contact_number = value;
        }

        Ok(config)
    }

    /// Set the station dataset path.
    pub fn with_stations_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.stations_path = path.into();
        self
    }

    /// Set the edge policy.
    pub fn with_edge_policy(mut self, policy: EdgePolicy) -> Self {
        self.edge_policy = policy;
        self
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind_addr, SocketAddr::from(([127, 0, 0, 1], 3000)));
        assert_eq!(config.stations_path, PathBuf::from("data/stations.json"));
        assert_eq!(config.users_path, PathBuf::from("data/users.json"));
        assert_eq!(config.static_dir, PathBuf::from("static"));
        assert_eq!(config.edge_policy, EdgePolicy::AsStored);
        assert_eq!(config.contact_number, DEFAULT_CONTACT_NUMBER);
    }

    #[test]
    fn overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("TRANSIT_BIND_ADDR", "0.0.0.0:8080"),
            ("TRANSIT_STATIONS_PATH", "/srv/stations.json"),
            ("TRANSIT_USERS_PATH", "/srv/users.json"),
            ("TRANSIT_STATIC_DIR", "/srv/www"),
            ("TRANSIT_SYMMETRIC_EDGES", "true"),
            ("TRANSIT_CONTACT_NUMBER", "5511900000000"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.stations_path, PathBuf::from("/srv/stations.json"));
        assert_eq!(config.users_path, PathBuf::from("/srv/users.json"));
        assert_eq!(config.static_dir, PathBuf::from("/srv/www"));
        assert_eq!(config.edge_policy, EdgePolicy::Symmetrize);
        assert_eq!(config.contact_number, "5511900000000");
    }

    #[test]
    fn invalid_values_are_errors() {
        let err = ServerConfig::from_lookup(lookup(&[("TRANSIT_BIND_ADDR", "localhost")]))
            .unwrap_err();
        assert!(err.to_string().starts_with("invalid value for TRANSIT_BIND_ADDR"));

        assert!(
            ServerConfig::from_lookup(lookup(&[("TRANSIT_SYMMETRIC_EDGES", "maybe")])).is_err()
        );
        assert!(
            ServerConfig::from_lookup(lookup(&[("TRANSIT_CONTACT_NUMBER", "+55 11")])).is_err()
        );
    }

    #[test]
    fn builder_methods() {
        let config = ServerConfig::default()
            .with_stations_path("fixtures/stations.json")
            .with_edge_policy(EdgePolicy::Symmetrize);
        assert_eq!(config.stations_path, PathBuf::from("fixtures/stations.json"));
        assert_eq!(config.edge_policy, EdgePolicy::Symmetrize);
    }
}
