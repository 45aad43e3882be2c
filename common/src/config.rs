use std::time::Duration;

use crate::network::host::ResolvedHost;
use crate::network::knock::{KnockSpec, Protocol};

pub const DEFAULT_TIMEOUT_MS: u64 = 200;
pub const DEFAULT_DELAY_MS: u64 = 200;

/// Everything one invocation needs to run a knock sequence.
///
/// Built once from the command line after resolution, read-only afterwards.
#[derive(Debug, Clone)]
pub struct KnockConfig {
    /// Resolved destination. Its family decides the family of every knock socket.
    pub target: ResolvedHost,
    /// Upper bound on how long a TCP knock waits for its connect attempt.
    pub timeout: Duration,
    /// Pause between two consecutive knocks. Never applied after the last one.
    pub delay: Duration,
    /// Protocol for specs that do not name one.
    pub default_protocol: Protocol,
    /// Knocks in the order they are sent.
    pub specs: Vec<KnockSpec>,
    /// Emits one trace line per knock.
    pub verbose: bool,
}

impl KnockConfig {
    pub fn new(target: ResolvedHost, specs: Vec<KnockSpec>) -> Self {
        Self {
            target,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            delay: Duration::from_millis(DEFAULT_DELAY_MS),
            default_protocol: Protocol::Tcp,
            specs,
            verbose: false,
        }
    }

    /// The `(protocol, port)` pairs the sequence will dispatch, in order.
    pub fn plan(&self) -> Vec<(Protocol, u16)> {
        self.specs
            .iter()
            .map(|spec| (spec.effective_protocol(self.default_protocol), spec.port))
            .collect()
    }
}
