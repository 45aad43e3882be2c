//! Per-knock transport probes.
//!
//! Each knock opens its own socket in the resolved address family, fires its probe and
//! drops the socket before returning. Nothing here retries or reports whether the
//! destination noticed the knock.

use std::io;
use std::net::SocketAddr;

use knockr_common::KnockError;
use knockr_common::network::knock::Protocol;

pub mod tcp;
pub mod udp;

fn transport_error(protocol: Protocol, addr: SocketAddr) -> impl FnOnce(io::Error) -> KnockError {
    move |source| KnockError::Transport {
        protocol,
        addr,
        source,
    }
}
