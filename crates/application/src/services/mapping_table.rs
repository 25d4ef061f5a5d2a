use netoverride_domain::MappingRecord;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Immutable index of overrides keyed by lower-cased domain.
///
/// Built once from a snapshot and never mutated; a refresh builds a new table.
#[derive(Debug, Default, Clone)]
pub struct MappingTable {
    entries: FxHashMap<Box<str>, Arc<str>>,
}

impl MappingTable {
    /// Builds a table from `records`. Later duplicates of a domain win.
    pub fn load<I>(records: I) -> Self
    where
        I: IntoIterator<Item = MappingRecord>,
    {
        let mut entries = FxHashMap::default();
        for record in records.into_iter().filter(MappingRecord::is_valid) {
            let key = record.domain.to_ascii_lowercase().into_boxed_str();
            entries.insert(key, record.destination);
        }
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Case-insensitive exact match.
    pub fn lookup_exact(&self, domain: &str) -> Option<&str> {
        let key = domain.to_ascii_lowercase();
        self.entries.get(key.as_str()).map(|d| d.as_ref())
    }

    /// Returns the configured key that `domain` is a strict subdomain of.
    ///
    /// Only suffixes that start right after a `.` are tried, so `foo.test`
    /// never blocks itself and `xfoo.test` is not under `foo.test`.
    pub fn blocking_apex(&self, domain: &str) -> Option<&str> {
        let lower = domain.to_ascii_lowercase();
        lower
            .match_indices('.')
            .map(|(i, _)| &lower[i + 1..])
            .find_map(|suffix| self.entries.get_key_value(suffix))
            .map(|(key, _)| key.as_ref())
    }

    pub fn is_blocked_subdomain(&self, domain: &str) -> bool {
        self.blocking_apex(domain).is_some()
    }
}
