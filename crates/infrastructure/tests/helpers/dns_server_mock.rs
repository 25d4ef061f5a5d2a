#![allow(dead_code)]
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

/// How the loopback resolver reacts to each query.
#[derive(Debug, Clone)]
pub enum ServerBehavior {
    /// Answer with the query, QR set, followed by a marker trailer.
    Echo,
    /// Answer with these exact bytes.
    Fixed(Vec<u8>),
    /// Answer with `len` bytes of 0xAB.
    Oversized(usize),
    /// Never answer.
    Silent,
}

pub struct MockDnsServer {
    addr: SocketAddr,
    received: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

pub const ECHO_TRAILER: &[u8] = b"mock";

impl MockDnsServer {
    /// Starts on an ephemeral loopback port.
    pub async fn start(behavior: ServerBehavior) -> std::io::Result<Self> {
        let socket = UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = socket.local_addr()?;
        let received = Arc::new(AtomicUsize::new(0));
        let counter = received.clone();

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            counter.fetch_add(1, Ordering::SeqCst);
                            if let Some(response) = Self::build_response(&behavior, &buf[..len]) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            received,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    pub fn received(&self) -> usize {
        self.received.load(Ordering::SeqCst)
    }

    pub fn echo_response(query: &[u8]) -> Vec<u8> {
        let mut response = query.to_vec();
        if response.len() > 2 {
            response[2] |= 0x80;
        }
        response.extend_from_slice(ECHO_TRAILER);
        response
    }

    fn build_response(behavior: &ServerBehavior, query: &[u8]) -> Option<Vec<u8>> {
        match behavior {
            ServerBehavior::Echo => Some(Self::echo_response(query)),
            ServerBehavior::Fixed(bytes) => Some(bytes.clone()),
            ServerBehavior::Oversized(len) => Some(vec![0xAB; *len]),
            ServerBehavior::Silent => None,
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
