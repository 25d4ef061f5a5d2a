pub mod control;
pub mod errors;
pub mod logging;
pub mod mappings;
pub mod proxy;
pub mod root;
pub mod upstream;

pub use control::ControlConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use mappings::{MappingsConfig, RefreshPolicy};
pub use proxy::ProxyConfig;
pub use root::{CliOverrides, Config};
pub use upstream::UpstreamConfig;
