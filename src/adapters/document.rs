use crate::domain::model::{FavoriteMovie, FavoritesList, MovieId, NewFavorite};
use crate::utils::error::{FavoritesError, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};

pub const FORMAT_VERSION: u32 = 1;

/// Everything the store persists: the favorites aggregate plus the id counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreDocument {
    pub format_version: u32,
    pub next_movie_id: MovieId,
    #[serde(default)]
    pub favorites: Option<FavoritesList>,
}

impl Default for StoreDocument {
    fn default() -> Self {
        Self {
            format_version: FORMAT_VERSION,
            next_movie_id: 1,
            favorites: None,
        }
    }
}

impl StoreDocument {
    /// 取得唯一的清單；不存在時建立空清單
    pub fn create_list(&mut self) -> &FavoritesList {
        self.favorites.get_or_insert_with(FavoritesList::empty)
    }

    pub fn insert(&mut self, movie: NewFavorite) -> FavoriteMovie {
        let id = self.next_movie_id;
        self.next_movie_id += 1;

        let record = FavoriteMovie {
            id,
            title: movie.title,
            year: movie.year,
            poster_url: movie.poster_url,
            imdb_id: movie.imdb_id,
            added_at: Utc::now(),
        };

        self.favorites
            .get_or_insert_with(FavoritesList::empty)
            .movies
            .push(record.clone());
        record
    }

    pub fn delete(&mut self, id: MovieId) -> Result<FavoriteMovie> {
        self.favorites
            .as_mut()
            .and_then(|list| list.remove(id))
            .ok_or(FavoritesError::RecordNotFound { id })
    }

    pub fn check_version(&self) -> Result<()> {
        if self.format_version > FORMAT_VERSION {
            return Err(FavoritesError::StoreRead {
                message: format!(
                    "store format version {} is newer than supported version {}",
                    self.format_version, FORMAT_VERSION
                ),
            });
        }
        Ok(())
    }
}
