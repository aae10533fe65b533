//! Bundle command handlers

use ambit_core::domain::bundle::BundleSpecification;
use ambit_core::domain::protocol::PropertyMap;
use ambit_workflow::AmbitClient;
use anyhow::{Context, Result, bail};
use clap::Subcommand;
use colored::*;

use super::print_json;
use crate::config::Config;

/// Bundle subcommands
#[derive(Subcommand)]
pub enum BundleCommands {
    /// Create a bundle and attach substances and properties to it
    Create {
        /// Substance owner ID
        #[arg(long)]
        owner: String,

        /// Bundle description
        #[arg(long, default_value = "")]
        description: String,

        /// User recorded as the bundle source
        #[arg(long, env = "AMBIT_USERNAME", default_value = "guest")]
        username: String,

        /// Substance to attach (repeatable); defaults to every substance of the owner
        #[arg(long = "substance")]
        substances: Vec<String>,

        /// Property category as TOP=SUB (repeatable); defaults to the full taxonomy
        #[arg(long = "property")]
        properties: Vec<String>,
    },
    /// List the substances of a bundle
    Substances {
        /// Bundle ID
        id: String,
    },
    /// List the properties of a bundle
    Properties {
        /// Bundle ID
        id: String,
    },
}

pub async fn handle_bundle_command(
    command: BundleCommands,
    client: &AmbitClient,
    config: &Config,
) -> Result<()> {
    match command {
        BundleCommands::Create {
            owner,
            description,
            username,
            substances,
            properties,
        } => {
            let spec = BundleSpecification::new(owner, description)
                .with_substances(substances)
                .with_properties(parse_properties(&properties)?);
            create_bundle(client, config, spec, &username).await
        }
        BundleCommands::Substances { id } => {
            let substances = client.get_bundle_substances(&id, &config.subject).await?;

            if substances.substance.is_empty() {
                println!("{}", format!("Bundle {} has no substances.", id).yellow());
                return Ok(());
            }

            println!(
                "{}",
                format!("Bundle {} ({} substance(s)):", id, substances.substance.len()).bold()
            );
            for substance in &substances.substance {
                println!(
                    "  {} {} {}",
                    "▸".cyan(),
                    substance.substance_id().unwrap_or("-"),
                    substance.name.as_deref().unwrap_or("").dimmed()
                );
            }
            Ok(())
        }
        BundleCommands::Properties { id } => {
            let properties = client.get_bundle_properties(&id, &config.subject).await?;
            print_json(&properties)
        }
    }
}

async fn create_bundle(
    client: &AmbitClient,
    config: &Config,
    spec: BundleSpecification,
    username: &str,
) -> Result<()> {
    println!(
        "{}",
        format!("Creating bundle for {}...", spec.substance_owner_id).dimmed()
    );

    let uri = client
        .create_bundle(spec, username, &config.subject)
        .await
        .context("Bundle creation failed")?;

    println!("{} {}", "✓ Bundle created:".green(), uri.bold());
    Ok(())
}

/// Parses `TOP=SUB` pairs into a property map
fn parse_properties(pairs: &[String]) -> Result<PropertyMap> {
    let mut properties = PropertyMap::new();

    for pair in pairs {
        let Some((top, sub)) = pair.split_once('=') else {
            bail!("Invalid property '{}', expected TOP=SUB", pair);
        };
        let (top, sub) = (top.trim(), sub.trim());
        if top.is_empty() || sub.is_empty() {
            bail!("Invalid property '{}', expected TOP=SUB", pair);
        }

        properties
            .entry(top.to_string())
            .or_default()
            .insert(sub.to_string());
    }

    Ok(properties)
}
