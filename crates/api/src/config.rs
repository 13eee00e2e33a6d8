//! HTTP server configuration.

use serde::{Deserialize, Serialize};

/// Where the server listens and which browser origins it accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address to bind to (default: "0.0.0.0:8080")
    #[serde(default = "default_bind")]
    pub bind: String,

    /// CORS allowed origins. Empty disables the CORS layer.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Defaults with a different listen address.
    pub fn with_bind(bind: impl Into<String>) -> Self {
        Self {
            bind: bind.into(),
            ..Default::default()
        }
    }
}
