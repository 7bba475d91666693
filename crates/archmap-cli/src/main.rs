//! archmap CLI tool.
//!
//! Usage:
//! ```bash
//! archmap list
//! archmap add --name shop --location ./snapshots --rules "web ->^ domain"
//! archmap rules shop
//! archmap classify shop com.shop.web.Cart com.shop.domain.Cart
//! archmap check shop --format compact
//! archmap remove shop
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;
mod snapshot;

/// Manage code explorer configurations and check dependency rules
#[derive(Parser)]
#[command(name = "archmap")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the configurations file
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List stored configurations
    List,

    /// Add a configuration
    Add {
        /// Project name
        #[arg(short, long)]
        name: String,

        /// Location to analyze (can be specified multiple times)
        #[arg(short, long = "location")]
        locations: Vec<PathBuf>,

        /// Rule text
        #[arg(short, long, conflicts_with = "rules_file")]
        rules: Option<String>,

        /// File containing the rule text
        #[arg(long)]
        rules_file: Option<PathBuf>,
    },

    /// Remove a configuration
    Remove {
        /// Configuration name or index
        selector: String,
    },

    /// Validate the rule text of a configuration
    Rules {
        /// Configuration name or index
        selector: String,
    },

    /// Classify a single dependency
    Classify {
        /// Configuration name or index
        selector: String,

        /// Qualified name of the depending element
        origin: String,

        /// Qualified name of the element depended upon
        target: String,
    },

    /// Classify every dependency found in the configuration's locations
    Check {
        /// Configuration name or index
        selector: String,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },
}

/// Output format for analysis reports.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-violation compact format.
    Compact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let source = config_resolver::resolve(cli.file.as_deref());

    match cli.command {
        Commands::List => commands::list::run(&source),
        Commands::Add {
            name,
            locations,
            rules,
            rules_file,
        } => commands::add::run(&source, name, locations, rules, rules_file.as_deref()),
        Commands::Remove { selector } => commands::remove::run(&source, &selector),
        Commands::Rules { selector } => commands::rules::run(&source, &selector),
        Commands::Classify {
            selector,
            origin,
            target,
        } => commands::classify::run(&source, &selector, &origin, &target),
        Commands::Check { selector, format } => commands::check::run(&source, &selector, format),
    }
}
