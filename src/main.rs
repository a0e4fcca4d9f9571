use clap::Parser;
use movie_favorites::adapters::terminal::write_details;
use movie_favorites::core::{FavoritesStore, NewFavorite};
use movie_favorites::utils::error::ErrorSeverity;
use movie_favorites::utils::validation::{validate_non_empty_string, validate_year, Validate};
use movie_favorites::utils::logger;
use movie_favorites::{
    AppConfig, CliConfig, Command, FavoritesError, FavoritesScreen, JsonFileStore, OmdbClient,
    StackNavigator, TextTableView,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    logger::init_cli_logger(config.logging.verbose, config.logging.json);
    tracing::debug!("Using favorites store at {}", config.store.path.display());

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(e) = run(cli.command, &config).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run(command: Command, config: &AppConfig) -> Result<(), FavoritesError> {
    let store = Arc::new(JsonFileStore::new(config.store.path.clone()));

    if let Command::Add {
        title,
        year,
        poster,
        imdb_id,
    } = command
    {
        validate_non_empty_string("title", &title)?;
        validate_year("year", &year)?;

        let movie = store
            .insert(NewFavorite {
                title,
                year,
                poster_url: poster,
                imdb_id,
            })
            .await?;
        store.save().await?;
        println!("⭐ Added {} ({}) to favorites", movie.title, movie.year);
        return Ok(());
    }

    let fetcher = Arc::new(OmdbClient::from_config(config)?);
    let mut screen = FavoritesScreen::new(
        Arc::clone(&store),
        fetcher,
        TextTableView::new(),
        StackNavigator::new(),
    );

    screen.did_load();
    screen.settle().await;
    if !screen.state().is_loaded() {
        // the screen only logs load failures; read again to report the cause
        store.fetch_first().await?;
    }

    let mut stdout = std::io::stdout();
    match command {
        Command::List | Command::Add { .. } => {}
        Command::Remove { row } => {
            let index = row_index(row, screen.row_count())?;
            let movie = screen.favorites().and_then(|list| list.get(index)).cloned();
            screen.delete_row(index);
            screen.settle().await;

            // the screen only logs save failures; check the file before reporting success
            if let Some(movie) = movie {
                if store.persisted_contains(movie.id).await? {
                    screen.revert();
                    screen.settle().await;
                    screen.view().write_to(&mut stdout)?;
                    screen.close().await;
                    return Err(FavoritesError::StoreWrite {
                        message: format!(
                            "{} ({}) is still saved in {}",
                            movie.title,
                            movie.year,
                            store.path().display()
                        ),
                    });
                }
                println!("🗑️  Removed {} ({}) from favorites", movie.title, movie.year);
            }
        }
        Command::Show { row } => {
            let index = row_index(row, screen.row_count())?;
            screen.select_row(index);
            screen.settle().await;

            match screen.navigator().top() {
                Some(details) => {
                    write_details(details, &mut stdout)?;
                    return Ok(());
                }
                None => {
                    let movie = screen.favorites().and_then(|list| list.get(index));
                    if let Some(movie) = movie {
                        eprintln!("⚠️  Could not load details for {} ({})", movie.title, movie.year);
                    }
                }
            }
        }
    }

    screen.view().write_to(&mut stdout)?;
    screen.close().await;
    Ok(())
}

fn row_index(row: usize, len: usize) -> Result<usize, FavoritesError> {
    if row == 0 || row > len {
        return Err(FavoritesError::RowOutOfRange {
            index: row.saturating_sub(1),
            len,
        });
    }
    Ok(row - 1)
}
