use crate::DomainError;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::sync::Arc;

/// A remote endpoint as described by the host network layer: a textual host
/// (IP literal or hostname) and an optional port.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FlowEndpoint {
    host: Arc<str>,
    port: Option<u16>,
}

impl FlowEndpoint {
    pub fn new(host: impl Into<Arc<str>>, port: Option<u16>) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn ip(&self) -> Option<IpAddr> {
        self.host.parse().ok()
    }
}

impl From<SocketAddr> for FlowEndpoint {
    fn from(addr: SocketAddr) -> Self {
        Self::new(addr.ip().to_string(), Some(addr.port()))
    }
}

fn parse_host_port(s: &str) -> Option<(&str, u16)> {
    if s.starts_with('[') {
        let end = s.find(']')?;
        let host = &s[1..end];
        let port_str = s[end + 1..].strip_prefix(':')?;
        let port = port_str.parse::<u16>().ok()?;
        Some((host, port))
    } else {
        let (host, port_str) = s.rsplit_once(':')?;
        if host.contains(':') {
            return None;
        }
        let port = port_str.parse::<u16>().ok()?;
        Some((host, port))
    }
}

impl FromStr for FlowEndpoint {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DomainError::InvalidEndpoint("empty endpoint".to_string()));
        }
        if let Ok(addr) = s.parse::<SocketAddr>() {
            return Ok(addr.into());
        }
        if let Ok(ip) = s.parse::<IpAddr>() {
            return Ok(Self::new(ip.to_string(), None));
        }
        if let Some((host, port)) = parse_host_port(s) {
            if host.is_empty() {
                return Err(DomainError::InvalidEndpoint(s.to_string()));
            }
            return Ok(Self::new(host, Some(port)));
        }
        if s.contains(':') || s.contains(char::is_whitespace) {
            return Err(DomainError::InvalidEndpoint(s.to_string()));
        }
        Ok(Self::new(s, None))
    }
}

impl fmt::Display for FlowEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bracket = self.host.contains(':');
        match (self.port, bracket) {
            (Some(port), true) => write!(f, "[{}]:{}", self.host, port),
            (Some(port), false) => write!(f, "{}:{}", self.host, port),
            (None, _) => write!(f, "{}", self.host),
        }
    }
}
