use serde::{Deserialize, Serialize};

pub const DEFAULT_DESCRIPTION: &str = "DNS Override";
pub const DEFAULT_PROVIDER_ID: &str = "netoverride.dns-proxy";

/// Platform-level switch for the proxy, as persisted by the resolver-control
/// capability.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResolverPreferences {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyEnablement {
    Enabled,
    Disabled,
}

impl ProxyEnablement {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Enabled => "enabled",
            Self::Disabled => "disabled",
        }
    }
}

impl From<&ResolverPreferences> for ProxyEnablement {
    fn from(prefs: &ResolverPreferences) -> Self {
        if prefs.enabled {
            Self::Enabled
        } else {
            Self::Disabled
        }
    }
}
