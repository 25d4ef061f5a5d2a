use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// Resolver handed to flows as their originally intended remote endpoint.
    #[serde(default = "default_resolver")]
    pub default_resolver: String,

    /// Destination port for forwarded queries.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Receive timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default = "default_max_response_size")]
    pub max_response_size: usize,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            default_resolver: default_resolver(),
            port: default_port(),
            timeout: default_timeout(),
            max_response_size: default_max_response_size(),
        }
    }
}

fn default_resolver() -> String {
    "8.8.8.8:53".to_string()
}

fn default_port() -> u16 {
    53
}

fn default_timeout() -> u64 {
    5
}

fn default_max_response_size() -> usize {
    512
}
