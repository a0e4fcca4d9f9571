pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliConfig, Command};

pub use adapters::json_store::JsonFileStore;
pub use adapters::memory_store::MemoryStore;
pub use adapters::omdb::OmdbClient;
pub use adapters::terminal::{StackNavigator, TextCell, TextTableView};
pub use config::AppConfig;
pub use crate::core::screen::{FavoritesScreen, ScreenAction, ScreenEvent, ScreenState};
pub use utils::error::{FavoritesError, Result};
