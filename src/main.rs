use clap::Parser;

use jams_lib::bootstrap::run_app;
use jams_lib::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run_app(Cli::parse()).await
}
