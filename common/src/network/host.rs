use std::net::{IpAddr, SocketAddr};

use crate::network::family::AddressFamily;

/// A host after name resolution.
///
/// The family is recorded once, at resolution time, and every knock socket is opened in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedHost {
    pub family: AddressFamily,
    pub ip: IpAddr,
}

impl ResolvedHost {
    pub fn new(ip: IpAddr) -> Self {
        Self {
            family: AddressFamily::of(&ip),
            ip,
        }
    }

    pub fn socket_addr(&self, port: u16) -> SocketAddr {
        SocketAddr::new(self.ip, port)
    }
}
