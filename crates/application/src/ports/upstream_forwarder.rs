use async_trait::async_trait;
use bytes::Bytes;
use netoverride_domain::{DomainError, FlowEndpoint};

#[async_trait]
pub trait UpstreamForwarder: Send + Sync {
    /// Sends `query` verbatim to the resolver behind `target` and returns the
    /// single reply it sends back, unmodified.
    async fn forward(&self, query: &[u8], target: &FlowEndpoint) -> Result<Bytes, DomainError>;
}
