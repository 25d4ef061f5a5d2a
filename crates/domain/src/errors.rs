use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid IPv4 destination: {0}")]
    InvalidDestination(String),

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Snapshot store unavailable: {0}")]
    SnapshotUnavailable(String),

    #[error("Failed to decode mapping snapshot: {0}")]
    SnapshotDecode(String),

    #[error("Unsupported snapshot version: {0}")]
    UnsupportedSnapshotVersion(u32),

    #[error("Failed to write mapping snapshot: {0}")]
    SnapshotWrite(String),

    #[error("Failed to resolve upstream resolver {host}")]
    UpstreamResolution { host: String },

    #[error("Upstream socket error: {0}")]
    UpstreamSocket(String),

    #[error("Partial send to {server}: sent {sent} of {expected} bytes")]
    UpstreamPartialSend {
        server: String,
        sent: usize,
        expected: usize,
    },

    #[error("Upstream query timeout waiting for {server}")]
    UpstreamTimeout { server: String },

    #[error("Upstream {server} returned an empty reply")]
    UpstreamEmptyReply { server: String },

    #[error("Invalid lifecycle transition: cannot {event} while {from}")]
    InvalidTransition {
        from: &'static str,
        event: &'static str,
    },

    #[error("Flow closed")]
    FlowClosed,

    #[error("Flow I/O error: {0}")]
    FlowIo(String),

    #[error("Resolver control error: {0}")]
    ResolverControl(String),
}
