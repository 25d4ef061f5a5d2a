use async_trait::async_trait;
use netoverride_application::ports::MappingSnapshotSource;
use netoverride_domain::{DomainError, MappingRecord};
use std::sync::RwLock;

/// Snapshot source backed by a list held in memory.
#[derive(Default)]
pub struct InMemorySnapshotSource {
    records: RwLock<Vec<MappingRecord>>,
}

impl InMemorySnapshotSource {
    pub fn new(records: Vec<MappingRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    pub fn replace(&self, records: Vec<MappingRecord>) {
        if let Ok(mut guard) = self.records.write() {
            *guard = records;
        }
    }
}

#[async_trait]
impl MappingSnapshotSource for InMemorySnapshotSource {
    async fn pull(&self) -> Result<Vec<MappingRecord>, DomainError> {
        self.records
            .read()
            .map(|records| records.clone())
            .map_err(|_| DomainError::SnapshotUnavailable("record list poisoned".to_string()))
    }
}
