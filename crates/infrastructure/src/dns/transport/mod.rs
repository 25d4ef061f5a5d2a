//! Upstream transports for pass-through queries. Only plain UDP is carried.
pub mod udp;
