mod search;

use clap::{Parser, Subcommand};
use relax_core::{AppConfig, Environment};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "relax-cli")]
#[command(about = "Find the best-rated business per configured location")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search every configured location and print the rating-ordered result
    Search {
        /// Free-text query, e.g. "pizza"
        term: String,
        /// Print one result per line instead of a pretty JSON array
        #[arg(long)]
        compact: bool,
    },
    /// Print the configured locations, one per line
    Locations,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = relax_core::load_app_config()?;
    init_tracing(&config)?;

    match cli.command {
        Commands::Search { term, compact } => search::run_search(&config, &term, compact).await?,
        Commands::Locations => {
            for location in &config.locations {
                println!("{location}");
            }
        }
    }

    Ok(())
}

fn init_tracing(config: &AppConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    // stdout carries the results
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);
    if matches!(config.env, Environment::Production) {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}
