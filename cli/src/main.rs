use clap::{Parser, Subcommand};

mod bus;
mod commands;
mod runtime;

use bus::BusKind;
use commands::restart::RestartArgs;

#[derive(Parser)]
#[command(name = "Berth")]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Message bus the container runtime listens on
    #[arg(long, global = true, value_enum, env = "BERTH_BUS", default_value_t = BusKind::Session)]
    pub bus: BusKind,

    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Restart one or more containers
    Restart(RestartArgs),
}

#[async_std::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    pretty_env_logger::formatted_builder()
        .filter(None, level)
        .parse_default_env()
        .init();

    let connection = bus::connect(cli.bus).await?;
    let proxy = bus::ContainerRuntimeProxy::new(&connection).await?;

    match cli.command {
        Commands::Restart(args) => args.run(&proxy).await,
    }
}
