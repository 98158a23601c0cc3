use anyhow::{Context, Result};
use clap::Parser;
use commands::{handle_command, Application};
use std::io;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

mod commands;
mod server;

/// Directive used when `RUST_LOG` is not set.
const DEFAULT_LOG_DIRECTIVE: &str = "info";

#[tokio::main]
async fn main() -> ExitCode {
    let app = Application::parse();

    if let Err(err) = init_logging() {
        eprintln!("Unable to initialize logging: {err:#}");
        return ExitCode::FAILURE;
    }

    if let Err(err) = handle_command(app).await {
        error!("web-service failed: {err:?}");
        return ExitCode::FAILURE;
    }

    debug!("web-service stopped");
    ExitCode::SUCCESS
}

/// Log to stderr, filtered by `RUST_LOG`. For example
/// `RUST_LOG=web_service=trace,info` also shows every relayed upstream
/// response.
fn init_logging() -> Result<()> {
    let filter_layer = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVE));

    Registry::default()
        .with(filter_layer)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .try_init()
        .context("unable to initialize logger")
}
