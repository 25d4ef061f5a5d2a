use async_trait::async_trait;
use netoverride_application::ports::MappingSnapshotSource;
use netoverride_domain::{DomainError, MappingRecord};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, warn};

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Deserialize)]
struct SnapshotFile {
    version: u32,
    #[serde(default)]
    records: Vec<StoredRecord>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StoredRecord {
    id: Option<String>,
    domain: Option<String>,
    destination: Option<String>,
}

#[derive(Serialize)]
struct SnapshotFileRef<'a> {
    version: u32,
    records: &'a [MappingRecord],
}

/// Mapping records kept in a versioned JSON file:
/// `{"version": 1, "records": [{"id", "domain", "destination"}]}`.
pub struct JsonSnapshotStore {
    path: PathBuf,
}

impl JsonSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Decodes a snapshot body. Incomplete records are skipped.
    pub fn decode(contents: &str) -> Result<Vec<MappingRecord>, DomainError> {
        let file: SnapshotFile = serde_json::from_str(contents)
            .map_err(|e| DomainError::SnapshotDecode(e.to_string()))?;

        if file.version != SNAPSHOT_VERSION {
            return Err(DomainError::UnsupportedSnapshotVersion(file.version));
        }

        let total = file.records.len();
        let records: Vec<MappingRecord> = file
            .records
            .into_iter()
            .filter_map(|stored| {
                MappingRecord::new(
                    stored.id.as_deref()?,
                    stored.domain.as_deref()?,
                    stored.destination.as_deref()?,
                )
            })
            .collect();

        if records.len() < total {
            warn!(
                skipped = total - records.len(),
                "Skipped incomplete mapping records"
            );
        }
        Ok(records)
    }

    pub fn encode(records: &[MappingRecord]) -> Result<String, DomainError> {
        serde_json::to_string_pretty(&SnapshotFileRef {
            version: SNAPSHOT_VERSION,
            records,
        })
        .map_err(|e| DomainError::SnapshotWrite(e.to_string()))
    }

    /// Replaces the stored snapshot. The file is written next to the target
    /// and renamed over it, so readers see the old or the new snapshot.
    #[instrument(skip(self, records), fields(path = %self.path.display()))]
    pub async fn save(&self, records: &[MappingRecord]) -> Result<(), DomainError> {
        let body = Self::encode(records)?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, body)
            .await
            .map_err(|e| DomainError::SnapshotWrite(format!("{}: {}", tmp.display(), e)))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| DomainError::SnapshotWrite(format!("{}: {}", self.path.display(), e)))?;

        debug!(records = records.len(), "Mapping snapshot saved");
        Ok(())
    }
}

#[async_trait]
impl MappingSnapshotSource for JsonSnapshotStore {
    async fn pull(&self) -> Result<Vec<MappingRecord>, DomainError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => Self::decode(&contents),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No mapping snapshot yet");
                Ok(Vec::new())
            }
            Err(e) => Err(DomainError::SnapshotUnavailable(format!(
                "{}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}
