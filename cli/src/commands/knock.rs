use std::time::Duration;

use anyhow::Context;
use knockr_common::KnockConfig;
use knockr_common::network::host::ResolvedHost;
use knockr_common::network::knock::{KnockSpec, parse_sequence};
use knockr_core::{resolver, sequencer};
use tracing::debug;

use crate::commands::CommandLine;

/// Validates the sequence, resolves the host and knocks.
///
/// Validation runs first so a bad port spec never reaches the resolver or the network.
pub async fn knock(commands: &CommandLine) -> anyhow::Result<()> {
    let specs: Vec<KnockSpec> =
        parse_sequence(&commands.ports).context("invalid knock sequence")?;
    debug!("knock sequence: {}", describe_sequence(&specs));

    let target: ResolvedHost = resolver::resolve(&commands.host, commands.family_preference())
        .await
        .with_context(|| format!("cannot knock on {}", commands.host))?;
    debug!("knocking on {} ({})", target.ip, target.family);

    let cfg: KnockConfig = build_config(commands, target, specs);
    sequencer::run(&cfg).await?;

    Ok(())
}

fn describe_sequence(specs: &[KnockSpec]) -> String {
    specs
        .iter()
        .map(KnockSpec::to_string)
        .collect::<Vec<String>>()
        .join(" ")
}

fn build_config(commands: &CommandLine, target: ResolvedHost, specs: Vec<KnockSpec>) -> KnockConfig {
    KnockConfig {
        target,
        timeout: Duration::from_millis(commands.timeout),
        delay: Duration::from_millis(commands.delay),
        default_protocol: commands.default_protocol(),
        specs,
        verbose: commands.verbose,
    }
}
