use std::net::SocketAddr;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

/// Deployment environment. Development error responses carry a `stack`
/// field with the error's debug rendering; production responses do not.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub environment: Environment,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:5000".parse().unwrap(),
            environment: Environment::Development,
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> ServerResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Apply `CARELINK_ADDR` and `CARELINK_ENV` overrides on top of the
    /// current values.
    pub fn with_env_overrides(mut self) -> ServerResult<Self> {
        if let Ok(addr) = std::env::var("CARELINK_ADDR") {
            self.bind_addr = addr
                .parse()
                .map_err(|_| ServerError::Config(format!("invalid CARELINK_ADDR: {addr}")))?;
        }
        if let Ok(env) = std::env::var("CARELINK_ENV") {
            self.environment = match env.as_str() {
                "production" => Environment::Production,
                "development" => Environment::Development,
                other => {
                    return Err(ServerError::Config(format!("invalid CARELINK_ENV: {other}")))
                }
            };
        }
        Ok(self)
    }
}
