mod auth;
mod chat;
mod cli;
mod config;
mod error;
mod giphy;
mod jenkins;
mod logging;
mod output;
mod params;
mod relay;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use log::error;

#[tokio::main]
async fn main() -> Result<()> {
    output::print_banner();

    let cli = Cli::parse();
    if let Err(e) = cli.execute().await {
        error!("{e:#}");
        return Err(e);
    }

    Ok(())
}
