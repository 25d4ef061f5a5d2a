//! NetOverride Domain Layer
pub mod config;
pub mod dns_wire;
pub mod errors;
pub mod flow_endpoint;
pub mod mapping_record;
pub mod proxy_state;
pub mod resolver_preferences;

pub use config::{CliOverrides, Config, ConfigError, RefreshPolicy};
pub use errors::DomainError;
pub use flow_endpoint::FlowEndpoint;
pub use mapping_record::MappingRecord;
pub use proxy_state::{LifecycleEvent, ProxyState};
pub use resolver_preferences::{ProxyEnablement, ResolverPreferences};
