pub mod flow;
pub mod transport;

pub use flow::{Delivery, PeerFlow, PeerFlowHandle};
pub use transport::udp::UdpUpstreamForwarder;
