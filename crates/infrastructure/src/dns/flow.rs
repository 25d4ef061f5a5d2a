use async_trait::async_trait;
use bytes::Bytes;
use netoverride_application::ports::{Datagram, DatagramFlow};
use netoverride_domain::{DomainError, FlowEndpoint};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::sync::{mpsc, Mutex};
use tracing::debug;

/// Sending half of a [`PeerFlow`], kept by the listener that demultiplexes
/// peers.
#[derive(Clone)]
pub struct PeerFlowHandle {
    sender: mpsc::Sender<Bytes>,
}

/// Outcome of handing one datagram to a flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Queued,
    /// The flow's queue is full; the datagram was dropped.
    Dropped,
    /// The flow's read loop has ended; open a new flow for this peer.
    Closed,
}

impl PeerFlowHandle {
    pub fn deliver(&self, payload: Bytes) -> Delivery {
        match self.sender.try_send(payload) {
            Ok(()) => Delivery::Queued,
            Err(mpsc::error::TrySendError::Full(_)) => Delivery::Dropped,
            Err(mpsc::error::TrySendError::Closed(_)) => Delivery::Closed,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

/// All traffic from one peer address on the local listener, presented as a
/// single flow.
///
/// Reads wait up to the idle timeout for a datagram, then drain whatever else
/// is already queued up to `max_batch`. Silence past the idle timeout closes
/// the flow. Replies go straight back to the peer over the shared socket.
pub struct PeerFlow {
    socket: Arc<UdpSocket>,
    peer: SocketAddr,
    remote: FlowEndpoint,
    inbound: Mutex<mpsc::Receiver<Bytes>>,
    idle_timeout: Duration,
    max_batch: usize,
}

impl PeerFlow {
    /// `remote` is the resolver the peer's queries were meant for.
    pub fn new(
        socket: Arc<UdpSocket>,
        peer: SocketAddr,
        remote: FlowEndpoint,
        idle_timeout: Duration,
        max_batch: usize,
    ) -> (Self, PeerFlowHandle) {
        let max_batch = max_batch.max(1);
        let (sender, receiver) = mpsc::channel(max_batch * 4);
        let flow = Self {
            socket,
            peer,
            remote,
            inbound: Mutex::new(receiver),
            idle_timeout,
            max_batch,
        };
        (flow, PeerFlowHandle { sender })
    }

    pub fn peer(&self) -> SocketAddr {
        self.peer
    }
}

#[async_trait]
impl DatagramFlow for PeerFlow {
    async fn read_datagrams(&self) -> Result<Vec<Datagram>, DomainError> {
        let mut inbound = self.inbound.lock().await;

        let first = match tokio::time::timeout(self.idle_timeout, inbound.recv()).await {
            Ok(Some(payload)) => payload,
            Ok(None) => return Err(DomainError::FlowClosed),
            Err(_) => {
                debug!(peer = %self.peer, "Flow idle, closing");
                inbound.close();
                return Err(DomainError::FlowClosed);
            }
        };

        let endpoint = FlowEndpoint::from(self.peer);
        let mut batch = Vec::with_capacity(self.max_batch);
        batch.push(Datagram::new(first, Some(endpoint.clone())));
        while batch.len() < self.max_batch {
            match inbound.try_recv() {
                Ok(payload) => batch.push(Datagram::new(payload, Some(endpoint.clone()))),
                Err(_) => break,
            }
        }
        Ok(batch)
    }

    async fn write_datagrams(&self, datagrams: Vec<Datagram>) -> Result<(), DomainError> {
        for datagram in datagrams {
            self.socket
                .send_to(&datagram.payload, self.peer)
                .await
                .map_err(|e| DomainError::FlowIo(format!("send to {}: {}", self.peer, e)))?;
        }
        Ok(())
    }

    fn remote_endpoint(&self) -> &FlowEndpoint {
        &self.remote
    }
}
