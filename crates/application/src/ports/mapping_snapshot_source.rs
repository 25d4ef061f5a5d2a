use async_trait::async_trait;
use netoverride_domain::{DomainError, MappingRecord};

/// Pull-only view of the external override store.
#[async_trait]
pub trait MappingSnapshotSource: Send + Sync {
    /// Returns the current records. Records with a missing or empty field are
    /// already dropped; an absent store yields an empty list.
    async fn pull(&self) -> Result<Vec<MappingRecord>, DomainError>;
}
