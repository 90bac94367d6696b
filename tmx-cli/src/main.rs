//! TMX CLI - Command line tool for monthly temperature matrices.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "tmx-cli",
    version,
    about = "Monthly temperature matrix toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: tmx_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    tmx_cmd::run(cli.command).await
}
