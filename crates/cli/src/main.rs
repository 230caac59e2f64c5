//! mintpress CLI - publish assets to content-addressed storage and project
//! minting costs.

mod commands;
mod report;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{estimate, upload};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mintpress")]
#[command(about = "Publish asset metadata and estimate minting costs", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload an image with its name and description, print the metadata URI
    Upload(upload::UploadArgs),

    /// Print a gas cost analysis for single, batch, and collection mints
    Estimate(estimate::EstimateArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays clean for results.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mintpress=info,mintpress_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Upload(args) => upload::run(args).await,
        Commands::Estimate(args) => estimate::run(args),
    }
}
