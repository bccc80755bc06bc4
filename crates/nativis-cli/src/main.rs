mod search;
mod validate;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use nativis_core::{AppConfig, Directory};
use nativis_locator::FilterQuery;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "nativis-cli")]
#[command(about = "Nativis partner locator command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Filter flags shared by `search` and `markers`. Each accepts `all`.
#[derive(Debug, Clone, Default, Args)]
struct FilterArgs {
    /// Free-text search over name, address, country, area and contact
    #[arg(long, short = 'q')]
    query: Option<String>,
    /// Brand id (e.g. Lush)
    #[arg(long)]
    brand: Option<String>,
    /// Country label or slug (e.g. hong-kong)
    #[arg(long)]
    country: Option<String>,
    /// Partner type: distributor, retail or bar
    #[arg(long = "type")]
    partner_type: Option<String>,
    /// Directory file (defaults to NATIVIS_DIRECTORY_PATH)
    #[arg(long)]
    path: Option<PathBuf>,
}

impl FilterArgs {
    fn filter_query(&self) -> FilterQuery {
        FilterQuery {
            q: self.query.clone(),
            brand: self.brand.clone(),
            country: self.country.clone(),
            partner_type: self.partner_type.clone(),
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List partner locations matching the filters
    Search {
        #[command(flatten)]
        filters: FilterArgs,
        /// Show the detail popup for this location id
        #[arg(long)]
        selected: Option<String>,
        /// Print the list view as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the map markers and viewport for the filters
    Markers {
        #[command(flatten)]
        filters: FilterArgs,
        /// Fetch brand logos so icons embed them
        #[arg(long)]
        fetch_logos: bool,
        /// Print markers, icons and viewport as JSON
        #[arg(long)]
        json: bool,
    },
    /// Load and validate a directory file
    Validate {
        /// Directory file (defaults to NATIVIS_DIRECTORY_PATH)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

/// Load the directory from `path`, or from the configured path.
fn open_directory(config: &AppConfig, path: Option<&Path>) -> anyhow::Result<Directory> {
    let path = path.unwrap_or(&config.directory_path);
    let directory = nativis_core::load_directory(path)
        .with_context(|| format!("loading directory {}", path.display()))?;
    tracing::debug!(path = %path.display(), locations = directory.len(), "directory loaded");
    Ok(directory)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = nativis_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Search {
            filters,
            selected,
            json,
        }) => search::run_search(&config, &filters, selected.as_deref(), json)?,
        Some(Commands::Markers {
            filters,
            fetch_logos,
            json,
        }) => search::run_markers(&config, &filters, fetch_logos, json).await?,
        Some(Commands::Validate { path }) => validate::run_validate(&config, path.as_deref())?,
        None => println!("nativis-cli: try `search`, `markers` or `validate` (see --help)"),
    }

    Ok(())
}
