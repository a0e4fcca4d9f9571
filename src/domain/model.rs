use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type MovieId = u64;

/// A movie saved to favorites, as persisted by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteMovie {
    pub id: MovieId,
    pub title: String,
    pub year: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imdb_id: Option<String>,
    pub added_at: DateTime<Utc>,
}

/// Fields needed to add a movie to favorites; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFavorite {
    pub title: String,
    pub year: String,
    pub poster_url: Option<String>,
    pub imdb_id: Option<String>,
}

impl NewFavorite {
    pub fn new(title: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            year: year.into(),
            poster_url: None,
            imdb_id: None,
        }
    }
}

/// The single aggregate root owning every favorite movie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoritesList {
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub movies: Vec<FavoriteMovie>,
}

impl FavoritesList {
    pub fn empty() -> Self {
        Self {
            created_at: Utc::now(),
            movies: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&FavoriteMovie> {
        self.movies.get(index)
    }

    /// Removes the movie with `id`, keeping the order of the remaining entries.
    pub fn remove(&mut self, id: MovieId) -> Option<FavoriteMovie> {
        let position = self.movies.iter().position(|movie| movie.id == id)?;
        Some(self.movies.remove(position))
    }

    pub fn titles(&self) -> Vec<&str> {
        self.movies.iter().map(|movie| movie.title.as_str()).collect()
    }
}

/// Full movie information resolved on demand for the details screen.
///
/// Never persisted; the stored [`FavoriteMovie`] only keeps what the list needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub title: String,
    pub year: String,
    pub rated: Option<String>,
    pub released: Option<String>,
    pub runtime: Option<String>,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub actors: Option<String>,
    pub plot: Option<String>,
    pub poster_url: Option<String>,
    pub imdb_rating: Option<String>,
    pub imdb_id: Option<String>,
}

impl MovieDetails {
    pub fn new(title: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            year: year.into(),
            rated: None,
            released: None,
            runtime: None,
            genre: None,
            director: None,
            actors: None,
            plot: None,
            poster_url: None,
            imdb_rating: None,
            imdb_id: None,
        }
    }

    pub fn matches(&self, title: &str, year: &str) -> bool {
        self.title.eq_ignore_ascii_case(title) && self.year == year
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: MovieId, title: &str, year: &str) -> FavoriteMovie {
        FavoriteMovie {
            id,
            title: title.to_string(),
            year: year.to_string(),
            poster_url: None,
            imdb_id: None,
            added_at: Utc::now(),
        }
    }

    #[test]
    fn test_remove_keeps_relative_order() {
        let mut list = FavoritesList::empty();
        list.movies = vec![
            movie(1, "Dune", "2021"),
            movie(2, "Arrival", "2016"),
            movie(3, "Sicario", "2015"),
        ];

        let removed = list.remove(2).unwrap();
        assert_eq!(removed.title, "Arrival");
        assert_eq!(list.titles(), vec!["Dune", "Sicario"]);
        assert!(list.remove(2).is_none());
    }

    #[test]
    fn test_details_match_is_case_insensitive_on_title() {
        let details = MovieDetails::new("Dune", "2021");
        assert!(details.matches("dune", "2021"));
        assert!(!details.matches("Dune", "1984"));
    }

    #[test]
    fn test_favorite_movie_serializes_without_empty_optionals() {
        let json = serde_json::to_value(movie(7, "Heat", "1995")).unwrap();
        assert_eq!(json["title"], "Heat");
        assert!(json.get("poster_url").is_none());
    }
}
