//! Main CLI application structure

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{course, shell};
use crate::storage::{CatalogLoader, Config, DuplicatePolicy};

#[derive(Parser)]
#[command(name = "catalog")]
#[command(author, version, about = "Ordered course catalog with prerequisite lookup")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the configured format)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Print elapsed time for each command
    #[arg(long, short = 't', global = true)]
    pub timings: bool,

    /// Catalog file to load
    #[arg(long, short = 'c', global = true, env = "CATALOG_FILE")]
    pub catalog: Option<PathBuf>,

    /// Configuration file (defaults to the user config directory)
    #[arg(long, global = true, env = "CATALOG_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all courses in course number order
    List,

    /// Show a course and its prerequisites
    Show {
        /// Course number (case-sensitive)
        id: String,
    },

    /// Report dangling prerequisites and repeated course numbers
    Check,

    /// Interactive menu (load, list, find)
    Shell,

    /// Print the effective configuration
    Config,
}

/// Settings resolved from flags, environment and config file
#[derive(Debug, Clone)]
pub struct Settings {
    /// Catalog file to load
    pub catalog: PathBuf,

    /// Handling of repeated course numbers
    pub duplicates: DuplicatePolicy,

    /// Print elapsed time per command or menu action
    pub timings: bool,
}

impl Settings {
    /// Flags win over the config file
    pub fn resolve(cli: &Cli, config: &Config) -> Self {
        Self {
            catalog: cli
                .catalog
                .clone()
                .unwrap_or_else(|| config.default_catalog.clone()),
            duplicates: config.duplicates,
            timings: cli.timings || config.timings,
        }
    }

    /// Loader configured with the duplicate policy
    pub fn loader(&self) -> CatalogLoader {
        CatalogLoader::new(self.duplicates)
    }
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_path(path)?,
        None => Config::load()?,
    };

    let format = cli.format.unwrap_or_else(|| config.default_format.into());
    let output = Output::new(format, cli.verbose);
    output.verbose("catalog starting");

    let settings = Settings::resolve(&cli, &config);
    output.verbose_ctx(
        "config",
        &format!(
            "catalog={}, duplicates={}, timings={}",
            settings.catalog.display(),
            settings.duplicates.as_str(),
            settings.timings
        ),
    );

    // The shell times each menu action itself
    let interactive = matches!(cli.command, Commands::Shell);
    let start = Instant::now();

    match &cli.command {
        Commands::List => course::list(&output, &settings)?,
        Commands::Show { id } => course::show(&output, &settings, id)?,
        Commands::Check => course::check(&output, &settings)?,
        Commands::Shell => shell::run(&output, &settings)?,
        Commands::Config => show_config(&output, &cli, &config)?,
    }

    if settings.timings && !interactive {
        output.timing(start.elapsed());
    }

    output.verbose("Command completed successfully");
    Ok(())
}

/// Prints the configuration currently in effect
fn show_config(output: &Output, cli: &Cli, config: &Config) -> Result<()> {
    let source = cli
        .config
        .clone()
        .or_else(Config::default_path)
        .map(|p| p.display().to_string());

    if output.is_json() {
        output.data(&serde_json::json!({
            "path": source,
            "config": config,
        }));
    } else {
        if let Some(path) = &source {
            println!("# {}", path);
        }
        print!("{}", config.to_toml()?);
    }

    Ok(())
}
