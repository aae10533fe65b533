//! Dataset command handlers

use ambit_workflow::AmbitClient;
use anyhow::Result;
use clap::Subcommand;
use colored::*;

use super::print_json;
use crate::config::Config;

/// Dataset subcommands
#[derive(Subcommand)]
pub enum DatasetCommands {
    /// Get a dataset
    Get {
        /// Dataset ID
        id: String,
    },
    /// Get the structures of a dataset
    Structures {
        /// Dataset ID
        id: String,
    },
}

pub async fn handle_dataset_command(
    command: DatasetCommands,
    client: &AmbitClient,
    config: &Config,
) -> Result<()> {
    let (id, dataset) = match command {
        DatasetCommands::Get { id } => {
            let dataset = client.get_dataset(&id, &config.subject).await?;
            (id, dataset)
        }
        DatasetCommands::Structures { id } => {
            let dataset = client.get_dataset_structures(&id, &config.subject).await?;
            (id, dataset)
        }
    };

    if dataset.is_empty() {
        println!("{}", format!("Dataset {} has no entries.", id).yellow());
    } else {
        println!(
            "{}",
            format!("Dataset {} ({} entries):", id, dataset.len()).bold()
        );
    }
    print_json(&dataset)
}
