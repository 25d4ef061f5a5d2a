use serde::{Deserialize, Serialize};

/// Local listener that stands in for the platform network layer.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProxyConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Seconds a peer flow may stay silent before its read loop ends.
    #[serde(default = "default_flow_idle_timeout")]
    pub flow_idle_timeout: u64,

    /// Most datagrams handed to a read loop in one batch.
    #[serde(default = "default_max_batch")]
    pub max_batch: usize,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            flow_idle_timeout: default_flow_idle_timeout(),
            max_batch: default_max_batch(),
        }
    }
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5353
}

fn default_flow_idle_timeout() -> u64 {
    30
}

fn default_max_batch() -> usize {
    32
}
