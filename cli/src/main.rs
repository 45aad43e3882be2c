mod commands;
mod terminal;

use commands::{CommandLine, knock};
use terminal::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.verbose);

    knock::knock(&commands).await
}
