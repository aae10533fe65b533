//! Ambit CLI
//!
//! Command-line interface for running Ambit workflows.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "ambit")]
#[command(about = "Ambit task and workflow CLI", long_about = None)]
struct Cli {
    /// Service base URL
    #[arg(
        long,
        env = "AMBIT_BASE_URL",
        default_value = "http://localhost:8080/ambit2"
    )]
    base_url: String,

    /// Subject id sent with every request
    #[arg(long, env = "AMBIT_SUBJECT_ID", default_value = "guest")]
    subject: String,

    /// Per-task polling budget in milliseconds
    #[arg(long, env = "AMBIT_POLL_TIMEOUT_MS")]
    poll_timeout_ms: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr, results to stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ambit_workflow=info,ambit_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config::load(cli.base_url, cli.subject, cli.poll_timeout_ms);

    handle_command(cli.command, &config).await
}
