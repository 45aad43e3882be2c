//! # Knock Specification Model
//!
//! Defines a single element of a knock sequence and how it is parsed.
//!
//! Accepted forms:
//! * A bare port (`7000`), which knocks with the sequence-wide default protocol.
//! * A port and a protocol (`7000:tcp`, `8000:udp`).

use std::fmt;
use std::str::FromStr;

use crate::error::KnockError;

/// Transport used for one knock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    Tcp,
    Udp,
}

impl FromStr for Protocol {
    type Err = KnockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tcp" => Ok(Protocol::Tcp),
            "udp" => Ok(Protocol::Udp),
            _ => Err(KnockError::InvalidProtocol {
                token: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Tcp => write!(f, "tcp"),
            Protocol::Udp => write!(f, "udp"),
        }
    }
}

/// One entry of the ordered knock sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnockSpec {
    pub port: u16,
    /// `None` means the sequence-wide default protocol applies.
    pub protocol: Option<Protocol>,
}

impl KnockSpec {
    pub fn new(port: u16, protocol: Option<Protocol>) -> Self {
        Self { port, protocol }
    }

    pub fn effective_protocol(&self, default: Protocol) -> Protocol {
        self.protocol.unwrap_or(default)
    }
}

impl FromStr for KnockSpec {
    type Err = KnockError;

    /// Parses `port` or `port:protocol`.
    ///
    /// Everything after the first `:` is taken as the protocol token, so `1:tcp:x`
    /// is rejected as an unknown protocol rather than silently truncated.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (port_str, protocol) = match s.split_once(':') {
            Some((port_str, token)) => (port_str, Some(token.parse::<Protocol>()?)),
            None => (s, None),
        };

        let port = parse_port(port_str).ok_or_else(|| KnockError::InvalidPort {
            spec: s.to_string(),
        })?;

        Ok(KnockSpec { port, protocol })
    }
}

impl fmt::Display for KnockSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.protocol {
            Some(protocol) => write!(f, "{}:{}", self.port, protocol),
            None => write!(f, "{}", self.port),
        }
    }
}

/// Parses a whole sequence up front.
///
/// Fails on the first bad entry so that a partially valid list never reaches the network.
pub fn parse_sequence<S: AsRef<str>>(specs: &[S]) -> Result<Vec<KnockSpec>, KnockError> {
    if specs.is_empty() {
        return Err(KnockError::EmptySequence);
    }

    specs.iter().map(|s| s.as_ref().parse()).collect()
}

fn parse_port(s: &str) -> Option<u16> {
    match s.parse::<u16>() {
        Ok(0) | Err(_) => None,
        Ok(port) => Some(port),
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
