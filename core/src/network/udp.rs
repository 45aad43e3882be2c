use std::net::SocketAddr;

use knockr_common::KnockError;
use knockr_common::network::host::ResolvedHost;
use knockr_common::network::knock::Protocol;
use tokio::net::UdpSocket;

use super::transport_error;

/// Sends a UDP knock: one zero-length datagram, fire-and-forget.
pub async fn knock(target: &ResolvedHost, port: u16) -> Result<(), KnockError> {
    let addr: SocketAddr = target.socket_addr(port);
    let local: SocketAddr = SocketAddr::new(target.family.unspecified(), 0);

    let socket: UdpSocket = UdpSocket::bind(local)
        .await
        .map_err(transport_error(Protocol::Udp, addr))?;

    socket
        .send_to(&[], addr)
        .await
        .map_err(transport_error(Protocol::Udp, addr))?;

    Ok(())
}
