//! CLI entry point for bloggen

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "bloggen")]
#[command(version)]
#[command(about = "A small Markdown blog generator", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build posts, the index page and the RSS feed
    #[command(alias = "b")]
    Build,

    /// Remove the output directory
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "bloggen=debug,info"
    } else {
        "bloggen=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Build => {
            let blog = bloggen::Blog::new(&base_dir)?;
            tracing::info!("Building blog in {:?}", base_dir);
            blog.build().await?;
        }

        Commands::Clean => {
            let blog = bloggen::Blog::new(&base_dir)?;
            tracing::info!("Cleaning output directory...");
            blog.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("bloggen version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
