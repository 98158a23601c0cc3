use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod start;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Application {
    #[command(subcommand)]
    pub command: SubCommands,
}

#[derive(Subcommand)]
pub enum SubCommands {
    /// Start the web server that relays trigger requests to the data service.
    Start(start::CliArguments),
}

pub async fn handle_command(app: Application) -> Result<()> {
    match app.command {
        SubCommands::Start(args) => start::handle_command(args).await,
    }
}
