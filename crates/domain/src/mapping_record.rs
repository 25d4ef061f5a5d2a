use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A single operator-configured override: queries for `domain` are answered
/// with `destination` instead of being resolved upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingRecord {
    pub id: Arc<str>,
    pub domain: Arc<str>,
    pub destination: Arc<str>,
}

impl MappingRecord {
    /// Builds a record, returning `None` when any field is empty.
    ///
    /// A trailing `.` on the domain is dropped so `example.test.` and
    /// `example.test` configure the same override.
    pub fn new(id: &str, domain: &str, destination: &str) -> Option<Self> {
        let domain = domain.trim().trim_end_matches('.');
        let destination = destination.trim();
        if id.is_empty() || domain.is_empty() || destination.is_empty() {
            return None;
        }
        Some(Self {
            id: id.into(),
            domain: domain.into(),
            destination: destination.into(),
        })
    }

    pub fn is_valid(&self) -> bool {
        !self.id.is_empty() && !self.domain.is_empty() && !self.destination.is_empty()
    }
}
