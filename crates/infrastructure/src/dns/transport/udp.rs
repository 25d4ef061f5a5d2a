//! UDP forwarding to the resolver a flow was originally headed for
//! (RFC 1035 §4.2.1).
//!
//! One ephemeral socket per query, one send, one receive. Messages go out
//! and come back unmodified.

use async_trait::async_trait;
use bytes::Bytes;
use netoverride_application::ports::UpstreamForwarder;
use netoverride_domain::config::UpstreamConfig;
use netoverride_domain::dns_wire::MAX_UDP_PAYLOAD;
use netoverride_domain::{DomainError, FlowEndpoint};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::{debug, warn};

const DNS_PORT: u16 = 53;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Pass-through forwarder over a fresh UDP socket per query.
pub struct UdpUpstreamForwarder {
    port: u16,
    timeout: Duration,
    max_response_size: usize,
}

impl Default for UdpUpstreamForwarder {
    fn default() -> Self {
        Self {
            port: DNS_PORT,
            timeout: DEFAULT_TIMEOUT,
            max_response_size: MAX_UDP_PAYLOAD,
        }
    }
}

impl UdpUpstreamForwarder {
    pub fn new(port: u16, timeout: Duration, max_response_size: usize) -> Self {
        Self {
            port,
            timeout,
            max_response_size,
        }
    }

    pub fn from_config(config: &UpstreamConfig) -> Self {
        Self::new(
            config.port,
            Duration::from_secs(config.timeout),
            config.max_response_size,
        )
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Resolves the endpoint's host on the forwarding port. The endpoint's
    /// own port is ignored. IPv4 addresses win when a name has both.
    async fn resolve(&self, target: &FlowEndpoint) -> Result<SocketAddr, DomainError> {
        if let Some(ip) = target.ip() {
            return Ok(SocketAddr::new(ip, self.port));
        }

        let resolution_failed = || DomainError::UpstreamResolution {
            host: target.host().to_string(),
        };
        let addrs: Vec<SocketAddr> = tokio::net::lookup_host((target.host(), self.port))
            .await
            .map_err(|e| {
                debug!(host = %target.host(), error = %e, "Upstream lookup failed");
                resolution_failed()
            })?
            .collect();

        addrs
            .iter()
            .find(|addr| addr.is_ipv4())
            .or_else(|| addrs.first())
            .copied()
            .ok_or_else(resolution_failed)
    }
}

#[async_trait]
impl UpstreamForwarder for UdpUpstreamForwarder {
    async fn forward(&self, query: &[u8], target: &FlowEndpoint) -> Result<Bytes, DomainError> {
        let server_addr = self.resolve(target).await?;

        // Bind to ephemeral port (0 = OS assigns)
        let bind_ip = if server_addr.is_ipv4() {
            IpAddr::V4(Ipv4Addr::UNSPECIFIED)
        } else {
            IpAddr::V6(Ipv6Addr::UNSPECIFIED)
        };
        let socket = UdpSocket::bind(SocketAddr::new(bind_ip, 0))
            .await
            .map_err(|e| DomainError::UpstreamSocket(format!("Failed to bind: {}", e)))?;

        let bytes_sent = socket.send_to(query, server_addr).await.map_err(|e| {
            DomainError::UpstreamSocket(format!("Failed to send to {}: {}", server_addr, e))
        })?;
        if bytes_sent != query.len() {
            return Err(DomainError::UpstreamPartialSend {
                server: server_addr.to_string(),
                sent: bytes_sent,
                expected: query.len(),
            });
        }

        debug!(server = %server_addr, bytes_sent, "UDP query sent");

        let mut recv_buf = vec![0u8; self.max_response_size];
        let (bytes_received, from_addr) =
            tokio::time::timeout(self.timeout, socket.recv_from(&mut recv_buf))
                .await
                .map_err(|_| DomainError::UpstreamTimeout {
                    server: server_addr.to_string(),
                })?
                .map_err(|e| {
                    DomainError::UpstreamSocket(format!(
                        "Failed to receive from {}: {}",
                        server_addr, e
                    ))
                })?;

        if bytes_received == 0 {
            return Err(DomainError::UpstreamEmptyReply {
                server: server_addr.to_string(),
            });
        }

        if from_addr.ip() != server_addr.ip() {
            warn!(
                expected = %server_addr,
                received_from = %from_addr,
                "UDP response from unexpected source"
            );
        }

        recv_buf.truncate(bytes_received);
        debug!(server = %server_addr, bytes_received, "UDP response received");

        Ok(Bytes::from(recv_buf))
    }
}
