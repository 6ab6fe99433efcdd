//! Folio CLI - build tooling for a localized portfolio and blog.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Build tooling for a localized portfolio and blog")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to folio.toml config file
    #[arg(short, long, default_value = "folio.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile content, patch generated modules, then bundle the site
    Build {
        /// Exit successfully after patching even if the compile failed
        #[arg(long)]
        force_success: bool,

        /// Do not retry a failed compile
        #[arg(long)]
        no_retry: bool,

        /// Remove generated and cache directories before compiling
        #[arg(long)]
        clean: bool,

        /// Stop after compiling and patching
        #[arg(long)]
        skip_bundle: bool,
    },

    /// Re-patch the generated index and regenerate RSS feeds
    Postbuild {
        /// Only generate feeds for these locales
        #[arg(short, long = "locale")]
        locales: Vec<String>,
    },

    /// Rewrite legacy import assertions in generated modules
    Patch {
        /// Directories to patch (defaults to the generated and cache dirs)
        dirs: Vec<PathBuf>,
    },

    /// Generate RSS feeds
    Feed {
        /// Only generate feeds for these locales
        #[arg(short, long = "locale")]
        locales: Vec<String>,
    },

    /// Write the tag table derived from the current posts
    Tags,

    /// Write a default folio.toml
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    // Execute command
    match cli.command {
        Commands::Build {
            force_success,
            no_retry,
            clean,
            skip_bundle,
        } => {
            let overrides = commands::build::Overrides {
                force_success,
                no_retry,
                clean,
                skip_bundle,
            };
            return commands::build::run(&cli.config, overrides).await;
        }
        Commands::Postbuild { locales } => {
            commands::postbuild::run(&cli.config, locales)?;
        }
        Commands::Patch { dirs } => {
            commands::patch::run(&cli.config, dirs)?;
        }
        Commands::Feed { locales } => {
            commands::feed::run(&cli.config, locales)?;
        }
        Commands::Tags => {
            commands::tags::run(&cli.config)?;
        }
        Commands::Init { yes } => {
            commands::init::run(&cli.config, yes)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
