//! The **knock sequencer**.
//!
//! Walks a [`KnockConfig`] front to back and dispatches one knock per spec, strictly in
//! order. Knock `i` is fully finished (socket opened, probe sent, wait elapsed, socket
//! closed) before knock `i + 1` starts, and the configured delay sits between two knocks
//! but never before the first or after the last.
//!
//! Transport failures of a single knock are traced when verbose and otherwise dropped.
//! The sequence has no way to know whether the remote side accepted it, so every
//! configured knock is always attempted. A fatal error from a knocker (configuration or
//! resolution) stops the sequence and is returned as is.

use std::error::Error;
use std::time::Duration;

use async_trait::async_trait;
use knockr_common::KnockConfig;
use knockr_common::KnockError;
use knockr_common::network::host::ResolvedHost;
use knockr_common::network::knock::Protocol;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::network::{tcp, udp};

/// Dispatches a single knock.
#[async_trait]
pub trait Knocker: Send {
    async fn knock(
        &mut self,
        protocol: Protocol,
        target: &ResolvedHost,
        port: u16,
        timeout: Duration,
    ) -> Result<(), KnockError>;
}

/// Knocks with real sockets.
#[derive(Debug, Default, Clone, Copy)]
pub struct SocketKnocker;

#[async_trait]
impl Knocker for SocketKnocker {
    async fn knock(
        &mut self,
        protocol: Protocol,
        target: &ResolvedHost,
        port: u16,
        timeout: Duration,
    ) -> Result<(), KnockError> {
        match protocol {
            Protocol::Tcp => tcp::knock(target, port, timeout).await,
            Protocol::Udp => udp::knock(target, port).await,
        }
    }
}

/// Runs the whole sequence with real sockets.
pub async fn run(config: &KnockConfig) -> Result<(), KnockError> {
    run_with(config, &mut SocketKnocker).await
}

/// Runs the whole sequence through `knocker`.
pub async fn run_with<K>(config: &KnockConfig, knocker: &mut K) -> Result<(), KnockError>
where
    K: Knocker + ?Sized,
{
    if config.specs.is_empty() {
        return Err(KnockError::EmptySequence);
    }

    let last_index: usize = config.specs.len() - 1;
    for (i, spec) in config.specs.iter().enumerate() {
        let protocol: Protocol = spec.effective_protocol(config.default_protocol);

        if config.verbose {
            info!("hitting {} {}", protocol, config.target.socket_addr(spec.port));
        }

        match knocker
            .knock(protocol, &config.target, spec.port, config.timeout)
            .await
        {
            Ok(()) => {}
            Err(err) if err.is_fatal() => return Err(err),
            Err(err) => {
                if config.verbose {
                    match err.source() {
                        Some(cause) => warn!("{err}: {cause}"),
                        None => warn!("{err}"),
                    }
                }
            }
        }

        if i != last_index && !config.delay.is_zero() {
            sleep(config.delay).await;
        }
    }

    if config.verbose {
        let count: usize = config.specs.len();
        let unit: &str = if count == 1 { "knock" } else { "knocks" };
        info!("{count} {unit} sent to {}", config.target.ip);
    }

    Ok(())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
