//! Error taxonomy shared by every knockr crate.
//!
//! Configuration and resolution errors are fatal and surface before any knock is sent.
//! Transport errors belong to a single knock and never abort the rest of the sequence.

use std::io;
use std::net::SocketAddr;

use thiserror::Error;

use crate::network::family::AddressFamily;
use crate::network::knock::Protocol;

#[derive(Debug, Error)]
pub enum KnockError {
    // ── Configuration ──────────────────────────────────────────────

    #[error("invalid protocol \"{token}\", allowed values are \"tcp\" and \"udp\"")]
    InvalidProtocol { token: String },

    #[error("invalid port in \"{spec}\", expected a number between 1 and 65535")]
    InvalidPort { spec: String },

    #[error("no ports to knock on")]
    EmptySequence,

    // ── Resolution ─────────────────────────────────────────────────

    #[error("could not resolve host \"{host}\"")]
    Resolution {
        host: String,
        #[source]
        source: io::Error,
    },

    #[error("host \"{host}\" has no {family} address")]
    NoAddress {
        host: String,
        family: AddressFamily,
    },

    // ── Transport ──────────────────────────────────────────────────

    #[error("{protocol} knock on {addr} failed")]
    Transport {
        protocol: Protocol,
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
}

impl KnockError {
    /// Fatal errors stop the program before any network I/O.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, KnockError::Transport { .. })
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
