use super::MappingTable;
use crate::ports::MappingSnapshotSource;
use arc_swap::ArcSwap;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Holds the live mapping table and swaps it wholesale on refresh.
///
/// Readers get a complete table, either the one before or the one after a
/// refresh.
pub struct MappingTableService {
    source: Arc<dyn MappingSnapshotSource>,
    current: ArcSwap<MappingTable>,
}

impl MappingTableService {
    pub fn new(source: Arc<dyn MappingSnapshotSource>) -> Self {
        Self {
            source,
            current: ArcSwap::from_pointee(MappingTable::default()),
        }
    }

    pub fn current(&self) -> Arc<MappingTable> {
        self.current.load_full()
    }

    /// Rebuilds the table from the snapshot source.
    ///
    /// An unavailable or undecodable source installs an empty table: no
    /// overrides, no blocks, everything passes through.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> usize {
        let table = match self.source.pull().await {
            Ok(records) => {
                for record in &records {
                    debug!(domain = %record.domain, destination = %record.destination, "Loaded mapping");
                }
                MappingTable::load(records)
            }
            Err(e) => {
                warn!(error = %e, "Mapping snapshot unavailable, passing all queries through");
                MappingTable::default()
            }
        };

        let count = table.len();
        self.current.store(Arc::new(table));
        info!(mappings = count, "Mapping table refreshed");
        count
    }
}
