use httpmock::prelude::*;
use movie_favorites::adapters::json_store::temp_path_for;
use movie_favorites::core::{FavoritesStore, NewFavorite};
use movie_favorites::{
    FavoritesScreen, JsonFileStore, OmdbClient, StackNavigator, TextTableView,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

type Screen = FavoritesScreen<JsonFileStore, OmdbClient, TextTableView, StackNavigator>;

async fn seeded_store(path: &Path, movies: &[(&str, &str)]) {
    let store = JsonFileStore::new(path);
    for (title, year) in movies {
        store.insert(NewFavorite::new(*title, *year)).await.unwrap();
    }
    store.save().await.unwrap();
}

fn screen_for(path: &Path, server: &MockServer) -> (Arc<JsonFileStore>, Screen) {
    let store = Arc::new(JsonFileStore::new(path));
    let fetcher = OmdbClient::new(
        server.url("/"),
        Some("test-key".to_string()),
        Duration::from_secs(5),
    )
    .unwrap();
    let screen = FavoritesScreen::new(
        Arc::clone(&store),
        Arc::new(fetcher),
        TextTableView::new(),
        StackNavigator::new(),
    );
    (store, screen)
}

#[tokio::test]
async fn test_first_load_creates_empty_list_without_saving() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("favorites.json");
    let server = MockServer::start();
    let (_, mut screen) = screen_for(&path, &server);

    screen.did_load();
    screen.settle().await;

    assert!(screen.state().is_loaded());
    assert_eq!(screen.row_count(), 0);
    assert!(screen.view().rows().is_empty());
    // the new list lives only in the working context until something saves
    assert!(!path.exists());
}

#[tokio::test]
async fn test_delete_first_of_two_persists_remaining_movie() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("favorites.json");
    seeded_store(&path, &[("Dune", "2021"), ("Arrival", "2016")]).await;

    let server = MockServer::start();
    let (_, mut screen) = screen_for(&path, &server);
    screen.did_load();
    screen.settle().await;
    assert_eq!(screen.view().labels(), vec!["Dune", "Arrival"]);

    screen.delete_row(0);
    screen.settle().await;

    assert_eq!(screen.row_count(), 1);
    assert_eq!(screen.view().labels(), vec!["Arrival"]);

    let reopened = JsonFileStore::new(&path);
    let list = reopened.fetch_first().await.unwrap().unwrap();
    assert_eq!(list.titles(), vec!["Arrival"]);
    assert_eq!(list.movies[0].year, "2016");
}

#[tokio::test]
async fn test_failed_save_leaves_rendered_rows_ahead_of_store() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("favorites.json");
    seeded_store(&path, &[("Dune", "2021"), ("Arrival", "2016")]).await;

    let server = MockServer::start();
    let (store, mut screen) = screen_for(&path, &server);
    screen.did_load();
    screen.settle().await;

    std::fs::create_dir(temp_path_for(&path)).unwrap();

    screen.delete_row(0);
    screen.settle().await;

    // rendered state has dropped the row while the file still holds it
    assert_eq!(screen.view().labels(), vec!["Arrival"]);
    let persisted = store.read_persisted().await.unwrap();
    assert_eq!(persisted.favorites.unwrap().titles(), vec!["Dune", "Arrival"]);
}

#[tokio::test]
async fn test_revert_after_failed_save_restores_persisted_rows() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("favorites.json");
    seeded_store(&path, &[("Dune", "2021"), ("Arrival", "2016")]).await;

    let server = MockServer::start();
    let (store, mut screen) = screen_for(&path, &server);
    screen.did_load();
    screen.settle().await;

    std::fs::create_dir(temp_path_for(&path)).unwrap();
    screen.delete_row(0);
    screen.settle().await;
    let dune = store.read_persisted().await.unwrap().favorites.unwrap().movies[0].id;
    assert!(store.persisted_contains(dune).await.unwrap());

    // reload reads the working context, which already dropped the record
    screen.reload();
    screen.settle().await;
    assert_eq!(screen.view().labels(), vec!["Arrival"]);

    screen.revert();
    screen.settle().await;
    assert_eq!(screen.view().labels(), vec!["Dune", "Arrival"]);

    // the record is back in the context, so deleting it again works once the disk recovers
    std::fs::remove_dir(temp_path_for(&path)).unwrap();
    screen.delete_row(0);
    screen.settle().await;
    assert!(!store.persisted_contains(dune).await.unwrap());
}

#[tokio::test]
async fn test_corrupt_store_renders_no_rows() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("favorites.json");
    std::fs::write(&path, "{ not json").unwrap();

    let server = MockServer::start();
    let (_, mut screen) = screen_for(&path, &server);
    screen.did_load();
    screen.settle().await;

    assert!(!screen.state().is_loaded());
    assert_eq!(screen.row_count(), 0);
    assert_eq!(screen.view().reload_count(), 1);
}

#[tokio::test]
async fn test_select_row_navigates_with_resolved_details() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("favorites.json");
    seeded_store(&path, &[("Dune", "2021"), ("Arrival", "2016")]).await;

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/")
            .query_param("t", "Dune")
            .query_param("y", "2021");
        then.status(200).json_body(serde_json::json!({
            "Title": "Dune",
            "Year": "2021",
            "Genre": "Action, Adventure, Drama",
            "Plot": "A noble family becomes embroiled in a war for control over the galaxy's most valuable asset.",
            "Response": "True"
        }));
    });

    let (_, mut screen) = screen_for(&path, &server);
    screen.did_load();
    screen.settle().await;

    screen.select_row(0);
    screen.settle().await;

    api_mock.assert();
    assert_eq!(screen.navigator().stack().len(), 1);
    let details = screen.navigator().top().unwrap();
    assert!(details.matches("Dune", "2021"));
    assert_eq!(details.genre.as_deref(), Some("Action, Adventure, Drama"));
}

#[tokio::test]
async fn test_select_row_lookup_failures_do_not_navigate() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("favorites.json");
    seeded_store(&path, &[("Dune", "2021"), ("Arrival", "2016")]).await;

    let server = MockServer::start();
    let not_found = server.mock(|when, then| {
        when.method(GET).path("/").query_param("t", "Dune");
        then.status(200).json_body(serde_json::json!({
            "Response": "False",
            "Error": "Movie not found!"
        }));
    });
    let broken = server.mock(|when, then| {
        when.method(GET).path("/").query_param("t", "Arrival");
        then.status(503);
    });

    let (_, mut screen) = screen_for(&path, &server);
    screen.did_load();
    screen.settle().await;

    screen.select_row(0);
    screen.select_row(1);
    screen.settle().await;

    not_found.assert();
    broken.assert();
    assert!(screen.navigator().stack().is_empty());
    assert_eq!(screen.row_count(), 2);
}
