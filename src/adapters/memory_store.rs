use crate::adapters::document::StoreDocument;
use crate::domain::model::{FavoriteMovie, FavoritesList, MovieId, NewFavorite};
use crate::domain::ports::FavoritesStore;
use crate::utils::error::Result;
use async_trait::async_trait;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct Context {
    working: StoreDocument,
    persisted: StoreDocument,
}

/// In-process store with the same working/persisted split as [`JsonFileStore`].
///
/// [`JsonFileStore`]: crate::adapters::json_store::JsonFileStore
#[derive(Debug, Default)]
pub struct MemoryStore {
    context: Mutex<Context>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store whose persisted state already holds `movies`, in order.
    pub fn with_favorites(movies: impl IntoIterator<Item = NewFavorite>) -> Self {
        let mut document = StoreDocument::default();
        document.create_list();
        for movie in movies {
            document.insert(movie);
        }
        Self {
            context: Mutex::new(Context {
                working: document.clone(),
                persisted: document,
            }),
        }
    }

    pub async fn persisted(&self) -> StoreDocument {
        self.context.lock().await.persisted.clone()
    }
}

#[async_trait]
impl FavoritesStore for MemoryStore {
    async fn fetch_first(&self) -> Result<Option<FavoritesList>> {
        Ok(self.context.lock().await.working.favorites.clone())
    }

    async fn create(&self) -> Result<FavoritesList> {
        Ok(self.context.lock().await.working.create_list().clone())
    }

    async fn insert(&self, movie: NewFavorite) -> Result<FavoriteMovie> {
        Ok(self.context.lock().await.working.insert(movie))
    }

    async fn delete(&self, id: MovieId) -> Result<FavoriteMovie> {
        self.context.lock().await.working.delete(id)
    }

    async fn save(&self) -> Result<()> {
        let mut context = self.context.lock().await;
        context.persisted = context.working.clone();
        Ok(())
    }

    async fn rollback(&self) -> Result<()> {
        let mut context = self.context.lock().await;
        context.working = context.persisted.clone();
        Ok(())
    }
}
