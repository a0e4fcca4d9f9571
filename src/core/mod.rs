pub mod catalog;
pub mod screen;

pub use crate::domain::model::{FavoriteMovie, FavoritesList, MovieDetails, MovieId, NewFavorite};
pub use crate::domain::ports::{
    ConfigProvider, FavoritesStore, FavoritesView, MovieCell, MovieDetailFetcher, Navigator,
};
pub use crate::utils::error::Result;
