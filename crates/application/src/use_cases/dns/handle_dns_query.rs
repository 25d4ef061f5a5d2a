use crate::services::{MappingTable, MappingTableService, PolicyDecider, PolicyDecision};
use bytes::Bytes;
use netoverride_domain::dns_wire::{create_address_record, create_nxdomain};
use std::sync::Arc;
use tracing::{debug, warn};

/// What to do with one intercepted query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// Write this synthesized reply back on the flow.
    Respond(Bytes),
    /// Relay the original bytes to the upstream resolver.
    Forward,
    /// Send nothing.
    Drop,
}

pub struct HandleDnsQueryUseCase {
    mappings: Arc<MappingTableService>,
}

impl HandleDnsQueryUseCase {
    pub fn new(mappings: Arc<MappingTableService>) -> Self {
        Self { mappings }
    }

    pub fn execute(&self, query: &[u8]) -> QueryOutcome {
        let table = self.mappings.current();
        Self::execute_with(&table, query)
    }

    /// Decides against a given table. Synchronous and free of I/O.
    pub fn execute_with(table: &MappingTable, query: &[u8]) -> QueryOutcome {
        match PolicyDecider::decide(table, query) {
            PolicyDecision::Override {
                domain,
                destination,
            } => match create_address_record(query, &destination) {
                Some(response) => {
                    debug!(domain = %domain, destination = %destination, "Answering with override");
                    QueryOutcome::Respond(response)
                }
                None => {
                    // Matched but unusable destination: dropped, not forwarded.
                    warn!(domain = %domain, destination = %destination, "Override destination is not an IPv4 address, dropping query");
                    QueryOutcome::Drop
                }
            },
            PolicyDecision::Deny { domain, apex } => match create_nxdomain(query) {
                Some(response) => {
                    debug!(domain = %domain, apex = %apex, "Subdomain of overridden domain, answering NXDOMAIN");
                    QueryOutcome::Respond(response)
                }
                None => QueryOutcome::Drop,
            },
            PolicyDecision::PassThrough { domain: Some(domain) } => {
                debug!(domain = %domain, "No override, forwarding upstream");
                QueryOutcome::Forward
            }
            PolicyDecision::PassThrough { domain: None } => {
                debug!(bytes = query.len(), "Unparseable query, forwarding upstream");
                QueryOutcome::Forward
            }
        }
    }
}
