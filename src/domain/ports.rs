use crate::domain::model::{FavoriteMovie, FavoritesList, MovieDetails, MovieId, NewFavorite};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;

/// Embedded persistence for the favorites aggregate.
///
/// `create`, `insert` and `delete` change the working context only; nothing
/// reaches durable storage until `save` succeeds. `rollback` throws the
/// working context away so the next read sees the persisted state.
#[async_trait]
pub trait FavoritesStore: Send + Sync {
    async fn fetch_first(&self) -> Result<Option<FavoritesList>>;
    async fn create(&self) -> Result<FavoritesList>;
    async fn insert(&self, movie: NewFavorite) -> Result<FavoriteMovie>;
    async fn delete(&self, id: MovieId) -> Result<FavoriteMovie>;
    async fn save(&self) -> Result<()>;
    async fn rollback(&self) -> Result<()>;
}

/// Looks up full movie details by natural key.
#[async_trait]
pub trait MovieDetailFetcher: Send + Sync {
    async fn resolve(&self, title: &str, year: &str) -> Result<MovieDetails>;
}

pub trait MovieCell {
    fn configure(&mut self, movie: &FavoriteMovie);
}

pub trait FavoritesView {
    type Cell: MovieCell;

    fn set_title(&mut self, title: &str);
    fn register_cell(&mut self, identifier: &str);
    fn dequeue_cell(&mut self, identifier: &str) -> Result<Self::Cell>;
    fn reload(&mut self, cells: Vec<Self::Cell>);
}

pub trait Navigator {
    fn push_details(&mut self, movie: MovieDetails);
}

pub trait ConfigProvider: Send + Sync {
    fn store_path(&self) -> &Path;
    fn omdb_endpoint(&self) -> &str;
    fn omdb_api_key(&self) -> Option<&str>;
    fn request_timeout(&self) -> Duration;
}
