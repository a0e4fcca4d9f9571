use crate::core::catalog::{self, RemoveOutcome};
use crate::core::{
    FavoriteMovie, FavoritesList, FavoritesStore, FavoritesView, MovieCell, MovieDetailFetcher,
    MovieDetails, MovieId, Navigator, Result,
};
use crate::utils::error::FavoritesError;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinSet};
use tokio_util::sync::CancellationToken;

pub const SCREEN_TITLE: &str = "Favorites";
pub const FAVORITE_CELL_ID: &str = "favorite-movie-cell";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ScreenState {
    #[default]
    Unloaded,
    Loaded(FavoritesList),
}

impl ScreenState {
    pub fn favorites(&self) -> Option<&FavoritesList> {
        match self {
            ScreenState::Unloaded => None,
            ScreenState::Loaded(list) => Some(list),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, ScreenState::Loaded(_))
    }
}

/// User and lifecycle input accepted by [`FavoritesScreen::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenAction {
    Appear,
    Reload,
    Revert,
    Select(usize),
    Delete(usize),
}

/// Result of a background unit of work, applied back on the screen's own task.
#[derive(Debug)]
pub enum ScreenEvent {
    FavoritesLoaded(Result<FavoritesList>),
    MovieRemoved {
        movie_id: MovieId,
        outcome: RemoveOutcome,
    },
    DetailsResolved(Result<MovieDetails>),
    Cancelled,
}

enum Step {
    Joined(std::result::Result<ScreenEvent, JoinError>),
    Action(ScreenAction),
    Stop,
}

/// Controller for the favorites list.
///
/// Store and detail lookups run as tasks owned by the screen. Their results
/// come back as [`ScreenEvent`]s and are applied only from `&mut self`, so state
/// changes and rendering never happen concurrently. Once the screen is torn
/// down, late results are discarded.
///
/// Deletes live in a separate task set that is never aborted: teardown and drop
/// leave them running until their save completes.
pub struct FavoritesScreen<S, F, V, N>
where
    S: FavoritesStore + 'static,
    F: MovieDetailFetcher + 'static,
    V: FavoritesView,
    N: Navigator,
{
    store: Arc<S>,
    fetcher: Arc<F>,
    view: V,
    navigator: N,
    state: ScreenState,
    load_requested: bool,
    tasks: JoinSet<ScreenEvent>,
    deletes: JoinSet<ScreenEvent>,
    cancel: CancellationToken,
}

impl<S, F, V, N> FavoritesScreen<S, F, V, N>
where
    S: FavoritesStore + 'static,
    F: MovieDetailFetcher + 'static,
    V: FavoritesView,
    N: Navigator,
{
    pub fn new(store: Arc<S>, fetcher: Arc<F>, mut view: V, navigator: N) -> Self {
        view.set_title(SCREEN_TITLE);
        view.register_cell(FAVORITE_CELL_ID);

        Self {
            store,
            fetcher,
            view,
            navigator,
            state: ScreenState::Unloaded,
            load_requested: false,
            tasks: JoinSet::new(),
            deletes: JoinSet::new(),
            cancel: CancellationToken::new(),
        }
    }

    /// Ties the screen's lifetime to `parent`: cancelling it tears the screen down.
    pub fn with_cancellation(mut self, parent: &CancellationToken) -> Self {
        self.cancel = parent.child_token();
        self
    }

    pub fn state(&self) -> &ScreenState {
        &self.state
    }

    pub fn favorites(&self) -> Option<&FavoritesList> {
        self.state.favorites()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn in_flight(&self) -> usize {
        self.tasks.len() + self.deletes.len()
    }

    pub fn is_torn_down(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// First appearance: loads the favorites list once per screen instance.
    pub fn did_load(&mut self) {
        if self.load_requested {
            tracing::debug!("Favorites already requested for this screen");
            return;
        }
        self.load_requested = true;
        self.spawn_load();
    }

    /// Fetches the list again from the store's working context, replacing whatever is held.
    pub fn reload(&mut self) {
        self.load_requested = true;
        self.spawn_load();
    }

    /// Drops unsaved store changes and loads the list as last persisted.
    ///
    /// After a failed save this brings the rows back in line with durable storage.
    pub fn revert(&mut self) {
        self.load_requested = true;
        let store = Arc::clone(&self.store);
        self.spawn_cancellable(async move {
            if let Err(e) = store.rollback().await {
                return ScreenEvent::FavoritesLoaded(Err(e));
            }
            ScreenEvent::FavoritesLoaded(catalog::fetch_or_create(store.as_ref()).await)
        });
    }

    /// Re-renders from the held list without touching the store.
    pub fn will_appear(&mut self) {
        self.render();
    }

    pub fn row_count(&self) -> usize {
        self.state.favorites().map_or(0, FavoritesList::len)
    }

    pub fn cell_for_row(&mut self, index: usize) -> Result<V::Cell> {
        let len = self.row_count();
        let movie = self
            .state
            .favorites()
            .and_then(|list| list.get(index))
            .ok_or(FavoritesError::RowOutOfRange { index, len })?;

        let mut cell = self.view.dequeue_cell(FAVORITE_CELL_ID)?;
        cell.configure(movie);
        Ok(cell)
    }

    pub fn select_row(&mut self, index: usize) {
        let Some(movie) = self.movie_at(index) else {
            tracing::warn!("Ignoring selection of row {} ({} rows)", index, self.row_count());
            return;
        };
        let title = movie.title.clone();
        let year = movie.year.clone();

        let fetcher = Arc::clone(&self.fetcher);
        self.spawn_cancellable(async move {
            ScreenEvent::DetailsResolved(fetcher.resolve(&title, &year).await)
        });
    }

    pub fn delete_row(&mut self, index: usize) {
        let Some(movie_id) = self.movie_at(index).map(|movie| movie.id) else {
            tracing::error!("Error finding movie to delete at row {}", index);
            self.render();
            return;
        };

        let store = Arc::clone(&self.store);
        self.deletes.spawn(async move {
            let outcome = catalog::remove_favorite(store.as_ref(), movie_id).await;
            ScreenEvent::MovieRemoved { movie_id, outcome }
        });
    }

    pub fn dispatch(&mut self, action: ScreenAction) {
        tracing::debug!("Dispatching {:?}", action);
        match action {
            ScreenAction::Appear => self.will_appear(),
            ScreenAction::Reload => self.reload(),
            ScreenAction::Revert => self.revert(),
            ScreenAction::Select(index) => self.select_row(index),
            ScreenAction::Delete(index) => self.delete_row(index),
        }
    }

    /// Waits for one in-flight task and applies its result.
    /// Returns `false` when nothing was in flight.
    pub async fn next_event(&mut self) -> bool {
        let has_tasks = !self.tasks.is_empty();
        let has_deletes = !self.deletes.is_empty();

        let joined = tokio::select! {
            Some(joined) = self.tasks.join_next(), if has_tasks => joined,
            Some(joined) = self.deletes.join_next(), if has_deletes => joined,
            else => return false,
        };
        self.handle_joined(joined);
        true
    }

    /// Applies results until no work is left in flight.
    pub async fn settle(&mut self) {
        while self.next_event().await {}
    }

    /// Drives the screen from `actions` until the channel closes or the screen is cancelled.
    pub async fn run(&mut self, mut actions: mpsc::Receiver<ScreenAction>) {
        self.did_load();

        loop {
            let has_tasks = !self.tasks.is_empty();
            let has_deletes = !self.deletes.is_empty();
            let cancel = self.cancel.clone();

            let step = tokio::select! {
                biased;
                _ = cancel.cancelled() => Step::Stop,
                Some(joined) = self.tasks.join_next(), if has_tasks => Step::Joined(joined),
                Some(joined) = self.deletes.join_next(), if has_deletes => Step::Joined(joined),
                action = actions.recv() => match action {
                    Some(action) => Step::Action(action),
                    None => Step::Stop,
                },
            };

            match step {
                Step::Joined(joined) => self.handle_joined(joined),
                Step::Action(action) => self.dispatch(action),
                Step::Stop => break,
            }
        }

        self.settle().await;
    }

    /// Aborts outstanding loads and lookups and discards every later result.
    /// In-flight deletes keep running until their save finishes.
    pub fn teardown(&mut self) {
        tracing::debug!(
            "Tearing down favorites screen ({} lookups, {} deletes in flight)",
            self.tasks.len(),
            self.deletes.len()
        );
        self.cancel.cancel();
        self.tasks.abort_all();
    }

    /// Cancels outstanding lookups but lets in-flight deletes finish saving.
    pub async fn close(mut self) {
        self.cancel.cancel();
        self.settle().await;
    }

    fn movie_at(&self, index: usize) -> Option<&FavoriteMovie> {
        self.state.favorites().and_then(|list| list.get(index))
    }

    fn spawn_load(&mut self) {
        let store = Arc::clone(&self.store);
        self.spawn_cancellable(async move {
            ScreenEvent::FavoritesLoaded(catalog::fetch_or_create(store.as_ref()).await)
        });
    }

    fn spawn_cancellable<W>(&mut self, work: W)
    where
        W: Future<Output = ScreenEvent> + Send + 'static,
    {
        let cancel = self.cancel.clone();
        self.tasks.spawn(async move {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => ScreenEvent::Cancelled,
                event = work => event,
            }
        });
    }

    fn handle_joined(&mut self, joined: std::result::Result<ScreenEvent, JoinError>) {
        match joined {
            Ok(event) => self.apply(event),
            Err(e) if e.is_cancelled() => tracing::debug!("Screen task aborted"),
            Err(e) => tracing::error!("Screen task failed: {}", e),
        }
    }

    fn apply(&mut self, event: ScreenEvent) {
        if self.cancel.is_cancelled() {
            tracing::debug!("Discarding {:?} after teardown", event);
            return;
        }

        match event {
            ScreenEvent::FavoritesLoaded(Ok(list)) => {
                tracing::debug!("Showing {} favorite movies", list.len());
                self.state = ScreenState::Loaded(list);
                self.render();
            }
            ScreenEvent::FavoritesLoaded(Err(e)) => {
                tracing::error!("Error fetching favorites list: {}", e);
                self.render();
            }
            ScreenEvent::MovieRemoved { movie_id, outcome } => {
                match &outcome {
                    RemoveOutcome::Saved => {}
                    RemoveOutcome::SaveFailed(e) => {
                        tracing::error!("Error saving data after deleting movie {}: {}", movie_id, e)
                    }
                    RemoveOutcome::DeleteFailed(e) => {
                        tracing::error!("Error deleting movie {}: {}", movie_id, e)
                    }
                }
                if outcome.record_removed() {
                    if let ScreenState::Loaded(list) = &mut self.state {
                        list.remove(movie_id);
                    }
                }
                self.render();
            }
            ScreenEvent::DetailsResolved(Ok(details)) => self.navigator.push_details(details),
            ScreenEvent::DetailsResolved(Err(e)) => {
                tracing::warn!("Could not resolve movie details: {}", e)
            }
            ScreenEvent::Cancelled => tracing::debug!("Screen task cancelled"),
        }
    }

    fn render(&mut self) {
        let rows = self.row_count();
        let mut cells = Vec::with_capacity(rows);
        for index in 0..rows {
            match self.cell_for_row(index) {
                Ok(cell) => cells.push(cell),
                Err(e) => tracing::warn!("Skipping row {}: {}", index, e),
            }
        }
        self.view.reload(cells);
    }
}

impl<S, F, V, N> Drop for FavoritesScreen<S, F, V, N>
where
    S: FavoritesStore + 'static,
    F: MovieDetailFetcher + 'static,
    V: FavoritesView,
    N: Navigator,
{
    fn drop(&mut self) {
        self.cancel.cancel();
        self.deletes.detach_all();
    }
}
