mod commands;
mod terminal;

use anyhow::bail;
use tracing::debug;

use commands::{CommandLine, Commands, cache, env_flag, list, show};
use netgrid_core::Collector;
use terminal::logging;

const MOCK_ENV: &str = "NETGRID_MOCK_MODE";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();
    logging::init_logging(commands.verbose);

    let mock_env = env_flag(std::env::var(MOCK_ENV).ok().as_deref());
    let cfg = commands.to_config(mock_env);
    debug!("Resolved configuration: {cfg:?}");

    let output = commands.output;
    let command = commands.command.unwrap_or_default();

    if let Commands::Cache { action } = command {
        return cache::cache(action, &cfg, output);
    }

    let collector = Collector::from_config(&cfg);
    let run = async {
        match command {
            Commands::Show { name } => show::show(&collector, &name, output).await,
            _ => list::list(&collector, output).await,
        }
    };

    tokio::select! {
        result = run => result,
        _ = tokio::signal::ctrl_c() => bail!("interrupted"),
    }
}
