use super::MappingTable;
use netoverride_domain::dns_wire::extract_domain;

/// Outcome of matching one query against the mapping table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyDecision {
    /// Exact match: answer with `destination`.
    Override { domain: String, destination: String },
    /// Strict subdomain of a configured `apex`: answer NXDOMAIN.
    Deny { domain: String, apex: String },
    /// No override applies, or no name could be read.
    PassThrough { domain: Option<String> },
}

/// Applies exact-match, then blocked-subdomain, then pass-through.
///
/// Every subdomain of an overridden apex is denied so a client cannot reach
/// the real address by asking for `www.` or similar.
pub struct PolicyDecider;

impl PolicyDecider {
    pub fn decide(table: &MappingTable, query: &[u8]) -> PolicyDecision {
        let Some(domain) = extract_domain(query) else {
            return PolicyDecision::PassThrough { domain: None };
        };

        if let Some(destination) = table.lookup_exact(&domain) {
            return PolicyDecision::Override {
                destination: destination.to_string(),
                domain,
            };
        }

        if let Some(apex) = table.blocking_apex(&domain) {
            return PolicyDecision::Deny {
                apex: apex.to_string(),
                domain,
            };
        }

        PolicyDecision::PassThrough {
            domain: Some(domain),
        }
    }
}
