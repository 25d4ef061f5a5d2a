use crate::ports::ResolverControl;
use netoverride_domain::{DomainError, ProxyEnablement};
use std::sync::Arc;
use tracing::info;

pub struct ProxyControlUseCase {
    control: Arc<dyn ResolverControl>,
}

impl ProxyControlUseCase {
    pub fn new(control: Arc<dyn ResolverControl>) -> Self {
        Self { control }
    }

    pub async fn status(&self) -> Result<ProxyEnablement, DomainError> {
        let prefs = self.control.load().await?;
        Ok(ProxyEnablement::from(&prefs))
    }

    pub async fn enable(&self) -> Result<(), DomainError> {
        self.control.enable().await?;
        info!("DNS proxy enabled");
        Ok(())
    }

    pub async fn disable(&self) -> Result<(), DomainError> {
        self.control.disable().await?;
        info!("DNS proxy disabled");
        Ok(())
    }
}
