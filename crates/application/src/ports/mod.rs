mod datagram_flow;
mod mapping_snapshot_source;
mod resolver_control;
mod upstream_forwarder;

pub use datagram_flow::{Datagram, DatagramFlow};
pub use mapping_snapshot_source::MappingSnapshotSource;
pub use resolver_control::ResolverControl;
pub use upstream_forwarder::UpstreamForwarder;
