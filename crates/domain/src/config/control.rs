use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ControlConfig {
    /// File holding the enable/disable preferences.
    #[serde(default = "default_state_path")]
    pub state_path: String,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            state_path: default_state_path(),
        }
    }
}

fn default_state_path() -> String {
    "netoverride-state.toml".to_string()
}
