use async_trait::async_trait;
use bytes::Bytes;
use netoverride_domain::{DomainError, FlowEndpoint};

/// One UDP payload together with the endpoint it is associated with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Datagram {
    pub payload: Bytes,
    pub endpoint: Option<FlowEndpoint>,
}

impl Datagram {
    pub fn new(payload: impl Into<Bytes>, endpoint: Option<FlowEndpoint>) -> Self {
        Self {
            payload: payload.into(),
            endpoint,
        }
    }
}

/// A bidirectional UDP exchange handed over by the host network layer.
///
/// The host owns the flow: it closes it, and a closed flow reports a terminal
/// error from `read_datagrams`.
#[async_trait]
pub trait DatagramFlow: Send + Sync {
    /// Waits for the next batch of pending datagrams. An empty batch is not
    /// terminal; only `Err` ends the read loop.
    async fn read_datagrams(&self) -> Result<Vec<Datagram>, DomainError>;

    async fn write_datagrams(&self, datagrams: Vec<Datagram>) -> Result<(), DomainError>;

    /// Where the platform meant to send this flow's queries.
    fn remote_endpoint(&self) -> &FlowEndpoint;
}
