//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod bundle;
mod dataset;
mod substance;

pub use bundle::BundleCommands;
pub use dataset::DatasetCommands;
pub use substance::{OwnerCommands, SubstanceCommands};

use ambit_workflow::AmbitClient;
use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use serde::Serialize;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Compute structure descriptors for a file
    Descriptors {
        /// Inline `data:` reference or http(s) URL of the structure file
        input: String,
    },
    /// Dataset lookups
    Dataset {
        #[command(subcommand)]
        command: DatasetCommands,
    },
    /// Bundle management
    Bundle {
        #[command(subcommand)]
        command: BundleCommands,
    },
    /// Substance lookups
    Substance {
        #[command(subcommand)]
        command: SubstanceCommands,
    },
    /// Substance owner lookups
    Owner {
        #[command(subcommand)]
        command: OwnerCommands,
    },
}

/// Handle a CLI command
///
/// Connects a client, routes the command to its handler module and closes
/// the client afterwards, whether the command succeeded or not.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    let client = AmbitClient::connect(config.client.clone())?;

    let result = match command {
        Commands::Descriptors { input } => generate_descriptors(&client, config, &input).await,
        Commands::Dataset { command } => {
            dataset::handle_dataset_command(command, &client, config).await
        }
        Commands::Bundle { command } => {
            bundle::handle_bundle_command(command, &client, config).await
        }
        Commands::Substance { command } => {
            substance::handle_substance_command(command, &client, config).await
        }
        Commands::Owner { command } => {
            substance::handle_owner_command(command, &client, config).await
        }
    };

    client.close().await;
    result
}

async fn generate_descriptors(client: &AmbitClient, config: &Config, input: &str) -> Result<()> {
    println!("{}", "Computing descriptors...".dimmed());

    let dataset = client
        .generate_descriptors(input, &config.subject)
        .await
        .context("Descriptor generation failed")?;

    println!(
        "{} {}",
        "✓".green(),
        format!("Dataset with {} entries", dataset.len()).bold()
    );
    print_json(&dataset)
}

/// Print a server document as pretty JSON
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to render response")?;
    println!("{}", json);
    Ok(())
}
