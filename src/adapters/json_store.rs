use crate::adapters::document::StoreDocument;
use crate::domain::model::{FavoriteMovie, FavoritesList, MovieId, NewFavorite};
use crate::domain::ports::FavoritesStore;
use crate::utils::error::{FavoritesError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct Context {
    // None until the file has been read
    document: Option<StoreDocument>,
    dirty: bool,
}

/// Single-file JSON store with a working context that is flushed on `save`.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    context: Mutex<Context>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            context: Mutex::new(Context::default()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 直接從磁碟讀取已保存的內容 (不經過工作區)
    pub async fn read_persisted(&self) -> Result<StoreDocument> {
        read_document(&self.path).await
    }

    /// 檢查某筆收藏是否仍存在於已保存的檔案中
    pub async fn persisted_contains(&self, id: MovieId) -> Result<bool> {
        let document = self.read_persisted().await?;
        Ok(document
            .favorites
            .is_some_and(|list| list.movies.iter().any(|movie| movie.id == id)))
    }

    async fn ensure_loaded<'a>(&self, context: &'a mut Context) -> Result<&'a mut StoreDocument> {
        if context.document.is_none() {
            let document = read_document(&self.path).await?;
            tracing::debug!(
                "Loaded favorites store from {} (next id {})",
                self.path.display(),
                document.next_movie_id
            );
            context.document = Some(document);
        }
        Ok(context.document.get_or_insert_with(StoreDocument::default))
    }
}

#[async_trait]
impl FavoritesStore for JsonFileStore {
    async fn fetch_first(&self) -> Result<Option<FavoritesList>> {
        let mut context = self.context.lock().await;
        let document = self.ensure_loaded(&mut context).await?;
        Ok(document.favorites.clone())
    }

    async fn create(&self) -> Result<FavoritesList> {
        let mut context = self.context.lock().await;
        let document = self.ensure_loaded(&mut context).await?;
        let existed = document.favorites.is_some();
        let list = document.create_list().clone();
        if !existed {
            context.dirty = true;
        }
        Ok(list)
    }

    async fn insert(&self, movie: NewFavorite) -> Result<FavoriteMovie> {
        let mut context = self.context.lock().await;
        let record = self.ensure_loaded(&mut context).await?.insert(movie);
        context.dirty = true;
        Ok(record)
    }

    async fn delete(&self, id: MovieId) -> Result<FavoriteMovie> {
        let mut context = self.context.lock().await;
        let removed = self.ensure_loaded(&mut context).await?.delete(id)?;
        context.dirty = true;
        Ok(removed)
    }

    async fn save(&self) -> Result<()> {
        let mut context = self.context.lock().await;
        if !context.dirty {
            return Ok(());
        }
        let Some(document) = context.document.as_ref() else {
            return Ok(());
        };

        let data = serde_json::to_vec_pretty(document)?;
        write_atomically(&self.path, &data)
            .await
            .map_err(|e| FavoritesError::StoreWrite {
                message: format!("{}: {}", self.path.display(), e),
            })?;

        context.dirty = false;
        tracing::debug!("Saved favorites store ({} bytes) to {}", data.len(), self.path.display());
        Ok(())
    }

    async fn rollback(&self) -> Result<()> {
        let mut context = self.context.lock().await;
        if context.dirty {
            tracing::warn!("Discarding unsaved favorites changes for {}", self.path.display());
        }
        // next access re-reads the file
        *context = Context::default();
        Ok(())
    }
}

async fn read_document(path: &Path) -> Result<StoreDocument> {
    let data = match tokio::fs::read(path).await {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(StoreDocument::default());
        }
        Err(e) => {
            return Err(FavoritesError::StoreRead {
                message: format!("{}: {}", path.display(), e),
            })
        }
    };

    let document: StoreDocument =
        serde_json::from_slice(&data).map_err(|e| FavoritesError::StoreRead {
            message: format!("{}: {}", path.display(), e),
        })?;
    document.check_version()?;
    Ok(document)
}

pub fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| "favorites".into());
    name.push(".tmp");
    path.with_file_name(name)
}

async fn write_atomically(path: &Path, data: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let temp_path = temp_path_for(path);
    tokio::fs::write(&temp_path, data).await?;
    tokio::fs::rename(&temp_path, path).await
}
