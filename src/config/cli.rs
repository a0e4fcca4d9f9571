use crate::config::AppConfig;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "movie-favorites")]
#[command(about = "List, inspect and remove favorite movies")]
pub struct CliConfig {
    #[arg(long, short, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Favorites store file (overrides store.path)")]
    pub store_path: Option<PathBuf>,

    #[arg(long, help = "OMDb-compatible endpoint (overrides omdb.endpoint)")]
    pub omdb_endpoint: Option<String>,

    #[arg(long, help = "OMDb API key (overrides omdb.api_key)")]
    pub api_key: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Show every favorite movie
    List,
    /// Add a movie to favorites
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        year: String,
        #[arg(long)]
        poster: Option<String>,
        #[arg(long)]
        imdb_id: Option<String>,
    },
    /// Remove the favorite at ROW (1-based, as printed by `list`)
    Remove { row: usize },
    /// Look up full details for the favorite at ROW (1-based)
    Show { row: usize },
}

impl CliConfig {
    /// 讀取設定檔 (若有) 並套用命令列覆寫
    pub fn resolve(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };

        if let Some(path) = &self.store_path {
            config.store.path = path.clone();
        }
        if let Some(endpoint) = &self.omdb_endpoint {
            config.omdb.endpoint = endpoint.clone();
        }
        if let Some(key) = &self.api_key {
            config.omdb.api_key = Some(key.clone());
        }
        config.logging.verbose |= self.verbose;
        config.logging.json |= self.json_logs;

        Ok(config)
    }
}
