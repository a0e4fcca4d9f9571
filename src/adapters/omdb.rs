use crate::domain::model::MovieDetails;
use crate::domain::ports::{ConfigProvider, MovieDetailFetcher};
use crate::utils::error::{FavoritesError, Result};
use crate::utils::validation::validate_required_field;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://www.omdbapi.com/";

/// OMDb 回應格式 (欄位名稱沿用 API 的大小寫)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OmdbResponse {
    response: String,
    error: Option<String>,
    title: Option<String>,
    year: Option<String>,
    rated: Option<String>,
    released: Option<String>,
    runtime: Option<String>,
    genre: Option<String>,
    director: Option<String>,
    actors: Option<String>,
    plot: Option<String>,
    poster: Option<String>,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<String>,
    #[serde(rename = "imdbID")]
    imdb_id: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty() && v != "N/A")
}

impl OmdbResponse {
    fn into_details(self, title: &str, year: &str) -> Result<MovieDetails> {
        if !self.response.eq_ignore_ascii_case("true") {
            tracing::debug!(
                "OMDb lookup for '{}' ({}) returned: {}",
                title,
                year,
                self.error.as_deref().unwrap_or("no error message")
            );
            return Err(FavoritesError::DetailLookupMiss {
                title: title.to_string(),
                year: year.to_string(),
            });
        }

        Ok(MovieDetails {
            title: present(self.title).unwrap_or_else(|| title.to_string()),
            year: present(self.year).unwrap_or_else(|| year.to_string()),
            rated: present(self.rated),
            released: present(self.released),
            runtime: present(self.runtime),
            genre: present(self.genre),
            director: present(self.director),
            actors: present(self.actors),
            plot: present(self.plot),
            poster_url: present(self.poster),
            imdb_rating: present(self.imdb_rating),
            imdb_id: present(self.imdb_id),
        })
    }
}

/// Detail fetcher backed by an OMDb-compatible HTTP API.
#[derive(Debug, Clone)]
pub struct OmdbClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl OmdbClient {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key,
        })
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        Self::new(
            config.omdb_endpoint(),
            config.omdb_api_key().map(str::to_string),
            config.request_timeout(),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl MovieDetailFetcher for OmdbClient {
    async fn resolve(&self, title: &str, year: &str) -> Result<MovieDetails> {
        let api_key = validate_required_field("omdb.api_key", &self.api_key)?;

        tracing::debug!("Resolving details for '{}' ({}) via {}", title, year, self.endpoint);
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("apikey", api_key.as_str()),
                ("t", title),
                ("y", year),
                ("plot", "full"),
            ])
            .send()
            .await?
            .error_for_status()?;

        tracing::debug!("OMDb response status: {}", response.status());
        let body: OmdbResponse = response.json().await?;
        body.into_details(title, year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn client_for(server: &MockServer) -> OmdbClient {
        OmdbClient::new(server.url("/"), Some("test-key".to_string()), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_resolve_found_movie() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/")
                .query_param("apikey", "test-key")
                .query_param("t", "Arrival")
                .query_param("y", "2016");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "Title": "Arrival",
                    "Year": "2016",
                    "Rated": "PG-13",
                    "Runtime": "116 min",
                    "Director": "Denis Villeneuve",
                    "Poster": "N/A",
                    "imdbRating": "7.9",
                    "imdbID": "tt2543164",
                    "Response": "True"
                }));
        });

        let details = client_for(&server).resolve("Arrival", "2016").await.unwrap();

        api_mock.assert();
        assert!(details.matches("Arrival", "2016"));
        assert_eq!(details.director.as_deref(), Some("Denis Villeneuve"));
        assert_eq!(details.imdb_id.as_deref(), Some("tt2543164"));
        assert!(details.poster_url.is_none());
    }

    #[tokio::test]
    async fn test_resolve_not_found_is_lookup_miss() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/");
            then.status(200).json_body(serde_json::json!({
                "Response": "False",
                "Error": "Movie not found!"
            }));
        });

        let err = client_for(&server).resolve("Nope", "1900").await.unwrap_err();
        assert!(matches!(err, FavoritesError::DetailLookupMiss { .. }));
    }

    #[tokio::test]
    async fn test_resolve_server_error_is_api_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/");
            then.status(500);
        });

        let err = client_for(&server).resolve("Dune", "2021").await.unwrap_err();
        assert!(matches!(err, FavoritesError::ApiError(_)));
    }

    #[tokio::test]
    async fn test_resolve_without_api_key() {
        let client = OmdbClient::new(DEFAULT_ENDPOINT, None, Duration::from_secs(5)).unwrap();
        let err = client.resolve("Dune", "2021").await.unwrap_err();
        assert!(matches!(err, FavoritesError::MissingConfigError { .. }));
    }
}
