//! Bluelink CLI - Command-line tool for Hyundai Bluelink / Kia UVO vehicles
//!
//! Signs in to the brand's European backend and shows the vehicles of the
//! account and their battery and charging status.

mod commands;
mod config;
mod output;

use anyhow::{Context, Result};
use bluelink_client::{BluelinkClient, Brand};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{AccountArgs, Config, MergedConfig};
use crate::output::{OutputContext, OutputFormat};

#[derive(Parser)]
#[command(name = "bluelink")]
#[command(author, version, about = "Hyundai Bluelink / Kia UVO CLI")]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file path (TOML, or JSON by extension)
    #[arg(short, long, env = "BLUELINK_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Vehicle brand: hyundai or kia
    #[arg(short, long, env = "BLUELINK_BRAND", global = true)]
    brand: Option<Brand>,

    /// Account e-mail
    #[arg(short, long, env = "BLUELINK_USERNAME", global = true)]
    username: Option<String>,

    /// Account password
    #[arg(
        short,
        long,
        env = "BLUELINK_PASSWORD",
        hide_env_values = true,
        global = true
    )]
    password: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, global = true)]
    output: Option<OutputFormat>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the vehicles bound to the account
    Vehicles,

    /// Show battery and charging status
    Status {
        /// Vehicle id, VIN or name (all vehicles when omitted)
        vehicle: Option<String>,
    },

    /// Draw a request stamp from the brand's pool
    Stamp,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();

    // Load config file
    let config = if let Some(config_path) = &cli.config {
        Config::load_from(config_path)?
    } else {
        Config::load().unwrap_or_default()
    };
    tracing::debug!(?config, "Loaded configuration");

    // Merge CLI args with config
    let merged = config.merge_with_args(AccountArgs {
        username: cli.username.as_deref(),
        password: cli.password.as_deref(),
        brand: cli.brand,
        output: cli.output.map(Into::into),
    });

    let format = OutputFormat::from_str(&merged.output, true)
        .map_err(|e| anyhow::anyhow!("Invalid output format '{}': {}", merged.output, e))?;
    let ctx = OutputContext::new(format);

    // Execute command
    let result = match &cli.command {
        Commands::Vehicles => {
            let client = connect(&merged, &ctx).await?;
            commands::vehicles(&client, &ctx).await
        }

        Commands::Status { vehicle } => {
            let client = connect(&merged, &ctx).await?;
            commands::status(&client, vehicle.as_deref(), &ctx).await
        }

        Commands::Stamp => commands::stamp(merged.brand()?, &ctx),
    };

    if let Err(e) = &result {
        ctx.error(&format!("Error: {:#}", e));
        std::process::exit(1);
    }
    Ok(())
}

/// Create a client and run the sign-in handshake
async fn connect(merged: &MergedConfig, ctx: &OutputContext) -> Result<BluelinkClient> {
    let account = merged.account()?;
    let brand = account.brand;
    let mut client = BluelinkClient::new(account).context("Failed to create Bluelink client")?;

    ctx.info(&format!("Signing in to {}", brand));
    client
        .authenticate()
        .await
        .with_context(|| format!("Failed to authenticate with {}", brand))?;
    Ok(client)
}
