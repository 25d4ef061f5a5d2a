use serde::{Deserialize, Serialize};

use super::control::ControlConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::mappings::MappingsConfig;
use super::proxy::ProxyConfig;
use super::upstream::UpstreamConfig;
use crate::dns_wire::HEADER_LEN;
use crate::FlowEndpoint;

const LOCAL_CONFIG_PATH: &str = "netoverride.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/netoverride/config.toml";

/// Main configuration structure for NetOverride
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Local listener (bind address, port, flow limits)
    #[serde(default)]
    pub proxy: ProxyConfig,

    /// Pass-through forwarding
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Mapping snapshot store and refresh cadence
    #[serde(default)]
    pub mappings: MappingsConfig,

    /// Enable/disable preferences
    #[serde(default)]
    pub control: ControlConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. netoverride.toml in current directory
    /// 3. /etc/netoverride/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path.map(str::to_string).or_else(Self::get_config_path) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.port {
            self.proxy.port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.proxy.bind_address = bind;
        }
        if let Some(store) = overrides.store_path {
            self.mappings.store_path = store;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.proxy.port == 0 {
            return Err(ConfigError::Validation("Proxy port cannot be 0".to_string()));
        }
        if self.proxy.flow_idle_timeout == 0 {
            return Err(ConfigError::Validation(
                "Flow idle timeout cannot be 0".to_string(),
            ));
        }
        if self.proxy.max_batch == 0 {
            return Err(ConfigError::Validation("Max batch cannot be 0".to_string()));
        }
        if self.upstream.port == 0 {
            return Err(ConfigError::Validation(
                "Upstream port cannot be 0".to_string(),
            ));
        }
        if self.upstream.timeout == 0 {
            return Err(ConfigError::Validation(
                "Upstream timeout cannot be 0".to_string(),
            ));
        }
        if !(HEADER_LEN..=65535).contains(&self.upstream.max_response_size) {
            return Err(ConfigError::Validation(format!(
                "Upstream max_response_size {} out of range",
                self.upstream.max_response_size
            )));
        }
        self.default_resolver()?;
        Ok(())
    }

    pub fn default_resolver(&self) -> Result<FlowEndpoint, ConfigError> {
        self.upstream
            .default_resolver
            .parse::<FlowEndpoint>()
            .map_err(|e| ConfigError::Validation(e.to_string()))
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        [LOCAL_CONFIG_PATH, SYSTEM_CONFIG_PATH]
            .into_iter()
            .find(|p| std::path::Path::new(p).exists())
            .map(str::to_string)
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub port: Option<u16>,
    pub bind_address: Option<String>,
    pub store_path: Option<String>,
    pub log_level: Option<String>,
}
