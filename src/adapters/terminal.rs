use crate::domain::model::{FavoriteMovie, MovieDetails};
use crate::domain::ports::{FavoritesView, MovieCell, Navigator};
use crate::utils::error::{FavoritesError, Result};
use std::collections::HashSet;
use std::io::Write;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextCell {
    pub title: String,
    pub year: String,
    pub poster_url: Option<String>,
}

impl MovieCell for TextCell {
    fn configure(&mut self, movie: &FavoriteMovie) {
        self.title = movie.title.clone();
        self.year = movie.year.clone();
        self.poster_url = movie.poster_url.clone();
    }
}

/// Plain-text table that keeps the last rendered frame.
#[derive(Debug, Default)]
pub struct TextTableView {
    title: String,
    registered: HashSet<String>,
    rows: Vec<TextCell>,
    reload_count: usize,
}

impl TextTableView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn rows(&self) -> &[TextCell] {
        &self.rows
    }

    pub fn labels(&self) -> Vec<&str> {
        self.rows.iter().map(|cell| cell.title.as_str()).collect()
    }

    pub fn reload_count(&self) -> usize {
        self.reload_count
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "{}", self.title)?;
        if self.rows.is_empty() {
            writeln!(out, "  (no favorites yet)")?;
            return Ok(());
        }
        for (index, cell) in self.rows.iter().enumerate() {
            writeln!(out, "  {:>2}. {} ({})", index + 1, cell.title, cell.year)?;
        }
        Ok(())
    }
}

impl FavoritesView for TextTableView {
    type Cell = TextCell;

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn register_cell(&mut self, identifier: &str) {
        self.registered.insert(identifier.to_string());
    }

    fn dequeue_cell(&mut self, identifier: &str) -> Result<TextCell> {
        if !self.registered.contains(identifier) {
            return Err(FavoritesError::CellUnavailable {
                identifier: identifier.to_string(),
            });
        }
        Ok(TextCell::default())
    }

    fn reload(&mut self, cells: Vec<TextCell>) {
        self.rows = cells;
        self.reload_count += 1;
    }
}

/// Navigation stack of pushed detail screens.
#[derive(Debug, Default)]
pub struct StackNavigator {
    stack: Vec<MovieDetails>,
}

impl StackNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stack(&self) -> &[MovieDetails] {
        &self.stack
    }

    pub fn top(&self) -> Option<&MovieDetails> {
        self.stack.last()
    }
}

impl Navigator for StackNavigator {
    fn push_details(&mut self, movie: MovieDetails) {
        tracing::debug!("Pushing details screen for '{}' ({})", movie.title, movie.year);
        self.stack.push(movie);
    }
}

pub fn write_details<W: Write>(movie: &MovieDetails, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "{} ({})", movie.title, movie.year)?;
    let fields = [
        ("Rated", &movie.rated),
        ("Released", &movie.released),
        ("Runtime", &movie.runtime),
        ("Genre", &movie.genre),
        ("Director", &movie.director),
        ("Actors", &movie.actors),
        ("IMDb rating", &movie.imdb_rating),
        ("Poster", &movie.poster_url),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            writeln!(out, "  {:<12} {}", format!("{}:", label), value)?;
        }
    }
    if let Some(plot) = &movie.plot {
        writeln!(out)?;
        writeln!(out, "{}", plot)?;
    }
    Ok(())
}
