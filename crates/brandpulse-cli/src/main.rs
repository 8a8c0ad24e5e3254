mod mentions;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "brandpulse-cli")]
#[command(about = "brandpulse command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch news mentions for a brand, score and store them
    Fetch {
        /// Brand name to search for
        brand: String,

        /// Classify into an in-memory store instead of the database
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the most recently published stored mentions
    Recent {
        /// Maximum number of mentions to print
        #[arg(long, default_value_t = brandpulse_core::DEFAULT_RECENT_LIMIT)]
        limit: usize,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("brandpulse-cli ready; see --help for commands");
        return Ok(());
    };

    let config = brandpulse_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match command {
        Commands::Fetch { brand, dry_run } => {
            mentions::run_fetch(&config, &brand, dry_run).await?;
        }
        Commands::Recent { limit, json } => {
            mentions::run_recent(&config, limit, json).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests;
