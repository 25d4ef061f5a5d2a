use bytes::Bytes;
use netoverride_application::use_cases::ProxyLifecycle;
use netoverride_domain::{Config, FlowEndpoint};
use netoverride_infrastructure::dns::{Delivery, PeerFlow, PeerFlowHandle};
use rustc_hash::FxHashMap;
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

const RECV_BUFFER_SIZE: usize = 4096;

/// Per-listener settings for the flows it opens.
#[derive(Debug, Clone)]
pub struct FlowSettings {
    /// Resolver the peers' queries are treated as originally headed for.
    pub remote: FlowEndpoint,
    pub idle_timeout: Duration,
    pub max_batch: usize,
}

impl FlowSettings {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            remote: config.default_resolver()?,
            idle_timeout: Duration::from_secs(config.proxy.flow_idle_timeout),
            max_batch: config.proxy.max_batch,
        })
    }
}

pub async fn start_dns_server(
    config: &Config,
    lifecycle: Arc<ProxyLifecycle>,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let bind_ip: IpAddr = config.proxy.bind_address.parse()?;
    let socket_addr = SocketAddr::new(bind_ip, config.proxy.port);
    let settings = FlowSettings::from_config(config)?;

    let socket = Arc::new(create_udp_socket(socket_addr)?);
    info!(bind_address = %socket_addr, upstream = %settings.remote, "DNS proxy listening");

    serve(socket, lifecycle, settings, shutdown).await;
    Ok(())
}

/// Receives datagrams until `shutdown` fires, giving every peer address its
/// own flow. A peer whose flow has closed gets a fresh one on its next
/// datagram.
pub async fn serve(
    socket: Arc<UdpSocket>,
    lifecycle: Arc<ProxyLifecycle>,
    settings: FlowSettings,
    shutdown: CancellationToken,
) {
    let mut flows: FxHashMap<SocketAddr, PeerFlowHandle> = FxHashMap::default();
    let mut recv_buf = vec![0u8; RECV_BUFFER_SIZE];

    loop {
        let (len, peer) = tokio::select! {
            _ = shutdown.cancelled() => {
                info!("DNS listener shutting down");
                break;
            }
            result = socket.recv_from(&mut recv_buf) => match result {
                Ok(received) => received,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    // ICMP port-unreachable surfaces here on some platforms
                    debug!(error = %e, "UDP recv error");
                    continue;
                }
            },
        };

        let payload = Bytes::copy_from_slice(&recv_buf[..len]);

        if let Some(handle) = flows.get(&peer) {
            match handle.deliver(payload.clone()) {
                Delivery::Queued => continue,
                Delivery::Dropped => {
                    debug!(peer = %peer, "Flow queue full, dropping datagram");
                    continue;
                }
                Delivery::Closed => {
                    flows.remove(&peer);
                }
            }
        }

        flows.retain(|_, handle| !handle.is_closed());

        let (flow, handle) = PeerFlow::new(
            socket.clone(),
            peer,
            settings.remote.clone(),
            settings.idle_timeout,
            settings.max_batch,
        );
        if lifecycle.accept_flow(Arc::new(flow)).await.is_none() {
            debug!(peer = %peer, "Proxy not running, dropping datagram");
            continue;
        }
        handle.deliver(payload);
        flows.insert(peer, handle);
    }
}

fn create_udp_socket(socket_addr: SocketAddr) -> anyhow::Result<UdpSocket> {
    let domain = if socket_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };
    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.set_recv_buffer_size(256 * 1024)?;
    socket.set_send_buffer_size(256 * 1024)?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;
    let std_socket: std::net::UdpSocket = socket.into();
    Ok(UdpSocket::from_std(std_socket)?)
}
