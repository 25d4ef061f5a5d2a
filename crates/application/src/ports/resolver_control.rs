use async_trait::async_trait;
use netoverride_domain::resolver_preferences::{DEFAULT_DESCRIPTION, DEFAULT_PROVIDER_ID};
use netoverride_domain::{DomainError, ResolverPreferences};

/// Platform-wide switch that decides whether the proxy runs at all.
#[async_trait]
pub trait ResolverControl: Send + Sync {
    async fn load(&self) -> Result<ResolverPreferences, DomainError>;

    async fn save(&self, prefs: &ResolverPreferences) -> Result<(), DomainError>;

    async fn enable(&self) -> Result<(), DomainError> {
        let mut prefs = self.load().await?;
        prefs.enabled = true;
        prefs.description = Some(DEFAULT_DESCRIPTION.to_string());
        prefs.provider_id = Some(DEFAULT_PROVIDER_ID.to_string());
        self.save(&prefs).await
    }

    async fn disable(&self) -> Result<(), DomainError> {
        let mut prefs = self.load().await?;
        prefs.enabled = false;
        self.save(&prefs).await
    }
}
