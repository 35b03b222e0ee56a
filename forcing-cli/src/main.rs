//! forcing-cli - Command line tool for building model forcing files.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "forcing-cli",
    version,
    about = "Reconstruct gap-free river, wind and meteorological forcing files"
)]
struct Cli {
    #[command(subcommand)]
    command: forcing_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    forcing_cmd::run(cli.command)
}
