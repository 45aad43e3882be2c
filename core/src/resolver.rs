//! Host name resolution.
//!
//! Runs once, before any knock. The address family found here is carried in the
//! [`ResolvedHost`] and reused for every socket of the sequence.

use std::io;
use std::net::IpAddr;

use knockr_common::KnockError;
use knockr_common::network::family::AddressFamily;
use knockr_common::network::host::ResolvedHost;
use tokio::net::lookup_host;
use tracing::debug;

/// Resolves `host` (a name or an IPv4/IPv6 literal) to a single address.
///
/// Without a preference the first address returned by the system resolver wins.
/// With one, the first address of that family wins.
pub async fn resolve(
    host: &str,
    preference: Option<AddressFamily>,
) -> Result<ResolvedHost, KnockError> {
    let addrs = lookup_host((host, 0))
        .await
        .map_err(|source| KnockError::Resolution {
            host: host.to_string(),
            source,
        })?;

    let candidates: Vec<IpAddr> = addrs.map(|addr| addr.ip()).collect();
    debug!("{host} resolved to {} address(es)", candidates.len());

    select_address(host, &candidates, preference).map(ResolvedHost::new)
}

fn select_address(
    host: &str,
    candidates: &[IpAddr],
    preference: Option<AddressFamily>,
) -> Result<IpAddr, KnockError> {
    let found = candidates
        .iter()
        .copied()
        .find(|ip| preference.is_none_or(|family| family.matches(ip)));

    match (found, preference) {
        (Some(ip), _) => Ok(ip),
        (None, Some(family)) => Err(KnockError::NoAddress {
            host: host.to_string(),
            family,
        }),
        (None, None) => Err(KnockError::Resolution {
            host: host.to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "no addresses returned"),
        }),
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
