use netoverride_application::ports::MappingSnapshotSource;
use netoverride_application::services::MappingTableService;
use netoverride_application::use_cases::{HandleDnsQueryUseCase, ProxyLifecycle, ServeFlowUseCase};
use netoverride_domain::Config;
use netoverride_infrastructure::dns::UdpUpstreamForwarder;
use netoverride_infrastructure::repositories::JsonSnapshotStore;
use std::sync::Arc;

pub struct ProxyServices {
    pub lifecycle: Arc<ProxyLifecycle>,
}

impl ProxyServices {
    pub fn new(config: &Config) -> Self {
        let store = Arc::new(JsonSnapshotStore::new(&config.mappings.store_path));
        Self::with_source(config, store)
    }

    pub fn with_source(config: &Config, source: Arc<dyn MappingSnapshotSource>) -> Self {
        let mappings = Arc::new(MappingTableService::new(source));
        let handler = Arc::new(HandleDnsQueryUseCase::new(mappings.clone()));
        let forwarder = Arc::new(UdpUpstreamForwarder::from_config(&config.upstream));
        let serve_flow = Arc::new(
            ServeFlowUseCase::new(mappings.clone(), handler, forwarder)
                .with_refresh_policy(config.mappings.refresh),
        );

        Self {
            lifecycle: Arc::new(ProxyLifecycle::new(mappings, serve_flow)),
        }
    }
}
