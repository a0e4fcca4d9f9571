use crate::core::{FavoritesList, FavoritesStore, MovieId};
use crate::utils::error::{FavoritesError, Result};

/// 取得收藏清單；若不存在則建立一個空清單 (不會自動保存)
pub async fn fetch_or_create<S: FavoritesStore + ?Sized>(store: &S) -> Result<FavoritesList> {
    match store.fetch_first().await? {
        Some(list) => {
            tracing::debug!("Fetched favorites list with {} movies", list.len());
            Ok(list)
        }
        None => {
            tracing::info!("Could not find favorites list, creating a new one");
            store.create().await
        }
    }
}

#[derive(Debug)]
pub enum RemoveOutcome {
    Saved,
    /// The working context dropped the record but persisting it failed.
    SaveFailed(FavoritesError),
    DeleteFailed(FavoritesError),
}

impl RemoveOutcome {
    pub fn record_removed(&self) -> bool {
        !matches!(self, RemoveOutcome::DeleteFailed(_))
    }
}

pub async fn remove_favorite<S: FavoritesStore + ?Sized>(store: &S, id: MovieId) -> RemoveOutcome {
    let removed = match store.delete(id).await {
        Ok(removed) => removed,
        Err(e) => return RemoveOutcome::DeleteFailed(e),
    };

    match store.save().await {
        Ok(()) => {
            tracing::info!("Removed '{}' ({}) from favorites", removed.title, removed.year);
            RemoveOutcome::Saved
        }
        Err(e) => RemoveOutcome::SaveFailed(e),
    }
}
