pub mod json_snapshot_store;
pub mod memory_snapshot_source;

pub use json_snapshot_store::{JsonSnapshotStore, SNAPSHOT_VERSION};
pub use memory_snapshot_source::InMemorySnapshotSource;
