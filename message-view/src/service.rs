//! Declared HTTP service of an intercepted request

use serde::{Deserialize, Serialize};

/// Host, port and protocol the request is sent to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HttpService {
    pub host: String,
    pub port: u16,
    pub protocol: String,
}

impl HttpService {
    pub fn new(host: impl Into<String>, port: u16, protocol: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            protocol: protocol.into(),
        }
    }

    /// Whether the service speaks plain HTTP
    pub fn is_http(&self) -> bool {
        self.protocol == "http"
    }
}

impl Default for HttpService {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 80,
            protocol: "http".to_string(),
        }
    }
}
