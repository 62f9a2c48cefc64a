use std::path::PathBuf;

use clap::{Parser, Subcommand};

use sitesearch::config::DataSource;

/// Search a site's content from the command line
#[derive(Parser)]
#[command(name = "sitesearch")]
#[command(about = "Load site content, search it and page through the results", long_about = None)]
pub struct Cli {
    /// Config file (TOML). Defaults to config.toml in the platform config directory
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Where content comes from: test, json or api
    #[arg(long, global = true)]
    pub source: Option<DataSource>,

    /// JSON file path or URL; `:resourceId` is substituted for the api source
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Bearer token for the api source
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Value for the `:resourceId` placeholder
    #[arg(long, global = true)]
    pub resource_id: Option<String>,

    /// Results per page
    #[arg(long, global = true)]
    pub per_page: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search the content
    Search {
        /// Search term
        term: String,
        /// Page to show
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Print the effective configuration as JSON
    Config,
    /// Report configuration problems and try loading the content
    Check,
}
