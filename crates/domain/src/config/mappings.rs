use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MappingsConfig {
    #[serde(default = "default_store_path")]
    pub store_path: String,

    #[serde(default)]
    pub refresh: RefreshPolicy,
}

/// When the mapping table is rebuilt from the snapshot source, on top of
/// proxy start and wake.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RefreshPolicy {
    /// Once when a flow is opened.
    #[default]
    PerFlow,

    /// Before every datagram handled on a flow.
    PerDatagram,
}

impl RefreshPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PerFlow => "per_flow",
            Self::PerDatagram => "per_datagram",
        }
    }
}

impl Default for MappingsConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            refresh: RefreshPolicy::default(),
        }
    }
}

fn default_store_path() -> String {
    "netoverride-records.json".to_string()
}
