//! Substance and substance owner command handlers

use ambit_workflow::AmbitClient;
use anyhow::Result;
use clap::Subcommand;
use colored::*;

use super::print_json;
use crate::config::Config;

/// Substance subcommands
#[derive(Subcommand)]
pub enum SubstanceCommands {
    /// List the studies of a substance
    Studies {
        /// Substance ID
        id: String,
    },
}

/// Substance owner subcommands
#[derive(Subcommand)]
pub enum OwnerCommands {
    /// List the substances of an owner as a bundle specification
    Substances {
        /// Substance owner ID
        id: String,
    },
}

pub async fn handle_substance_command(
    command: SubstanceCommands,
    client: &AmbitClient,
    config: &Config,
) -> Result<()> {
    match command {
        SubstanceCommands::Studies { id } => {
            let studies = client.get_substance_studies(&id, &config.subject).await?;

            if studies.study.is_empty() {
                println!("{}", format!("No studies found for {}.", id).yellow());
                return Ok(());
            }

            println!(
                "{}",
                format!("Found {} study(ies) for {}:", studies.study.len(), id).bold()
            );
            for study in &studies.study {
                println!(
                    "  {} {} {}",
                    "▸".cyan(),
                    study.protocol.top_category.as_deref().unwrap_or("-"),
                    study.protocol.endpoint.as_deref().unwrap_or("").dimmed()
                );
            }
            Ok(())
        }
    }
}

pub async fn handle_owner_command(
    command: OwnerCommands,
    client: &AmbitClient,
    config: &Config,
) -> Result<()> {
    match command {
        OwnerCommands::Substances { id } => {
            let spec = client.get_owner_substances(&id, &config.subject).await?;
            print_json(&spec)
        }
    }
}
