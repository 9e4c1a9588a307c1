//! `TmdbClient` - TMDB API client implementation.

use anyhow::{Context, Result, anyhow, bail};
use reqwest::Client;
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use super::api::LocalTmdbApi;
use super::types::{
    DiscoverMovieParams, GenreList, MovieList, MoviePage, MovieRecord, SearchMovieParams,
    TmdbErrorResponse,
};

/// Default base URL for TMDB API v3.
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// TMDB API client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// Bearer API token.
    api_token: String,
}

/// Builder for `TmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClientBuilder {
    base_url: Option<Url>,
    api_token: Option<String>,
    user_agent: Option<String>,
}

impl TmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_token: None,
            user_agent: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API bearer token (required).
    #[must_use]
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `api_token` is not set.
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<TmdbClient> {
        let api_token = self.api_token.context("api_token is required")?;
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(TmdbClient {
            http_client,
            base_url,
            api_token,
        })
    }
}

impl TmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder::new()
    }

    /// Appends `segments` to the base URL, percent-encoding each one so a
    /// caller-supplied id cannot escape its path position.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| anyhow!("base URL cannot carry a path: {}", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends a GET request with Bearer auth and query params and decodes
    /// the JSON body.
    ///
    /// No retry is attempted; the first failure is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent, the response status
    /// is not 2xx, or the body cannot be read or decoded as `T`.
    #[instrument(skip_all)]
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<T> {
        let path = segments.join("/");
        let url = self.endpoint(segments)?;

        let request = self
            .http_client
            .get(url)
            .bearer_auth(&self.api_token)
            .header(ACCEPT, "application/json")
            .query(query)
            .build()
            .with_context(|| format!("failed to build request: {path}"))?;

        tracing::debug!(url = %request.url(), "TMDB API request");

        let result = self.http_client.execute(request).await;
        let response = result.with_context(|| format!("request failed: {path}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to read body>"));
            if let Ok(error_response) = serde_json::from_str::<TmdbErrorResponse>(&body) {
                bail!(
                    "TMDB API error (HTTP {}): code={}, message={}",
                    status,
                    error_response.status_code,
                    error_response.status_message,
                );
            }
            bail!("TMDB API error (HTTP {status}): {body}");
        }

        let body = response
            .text()
            .await
            .with_context(|| format!("failed to read response body: {path}"))?;
        let raw_result: std::result::Result<T, _> = serde_json::from_str(&body);
        let parsed =
            raw_result.with_context(|| format!("failed to decode JSON response: {path}"))?;
        Ok(parsed)
    }

    /// Like [`TmdbClient::get_json`], but logs any failure and returns
    /// `None` in its place.
    ///
    /// `None` means "no data" and is never the same as an empty body.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Option<T> {
        match self.get_json(segments, query).await {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                tracing::warn!(path = %segments.join("/"), "Error fetching from TMDB: {err:#}");
                None
            }
        }
    }
}

impl LocalTmdbApi for TmdbClient {
    #[instrument(skip(self))]
    async fn movie_list(&self, list: MovieList, page: u32) -> Option<MoviePage> {
        let query = [
            ("language", String::from(list.language())),
            ("page", page.to_string()),
        ];
        self.fetch(&["movie", list.segment()], &query).await
    }

    #[instrument(skip(self, params), fields(genre_id = %params.genre_id))]
    async fn discover_movies(
        &self,
        params: &DiscoverMovieParams,
        page: u32,
    ) -> Option<MoviePage> {
        let query = params.to_query(page);
        self.fetch(&["discover", "movie"], &query).await
    }

    #[instrument(skip(self, params))]
    async fn search_movies(&self, params: &SearchMovieParams, page: u32) -> Option<MoviePage> {
        let query = params.to_query(page);
        self.fetch(&["search", "movie"], &query).await
    }

    #[instrument(skip(self))]
    async fn movie_genres(&self, language: &str) -> Option<GenreList> {
        let query = [("language", String::from(language))];
        self.fetch(&["genre", "movie", "list"], &query).await
    }

    #[instrument(skip(self))]
    async fn movie_details(&self, movie_id: &str, language: &str) -> Option<MovieRecord> {
        let query = [("language", String::from(language))];
        self.fetch(&["movie", movie_id], &query).await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use serde_json::json;

    use super::*;

    fn client_for(mock_server: &wiremock::MockServer, token: &str) -> TmdbClient {
        let base_url = format!("{}/3/", mock_server.uri());
        TmdbClient::builder()
            .base_url(base_url.parse().unwrap())
            .api_token(token)
            .user_agent("test/0.0.0")
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_requires_api_token() {
        // Arrange & Act
        let result = TmdbClient::builder().user_agent("test/0.0.0").build();

        // Assert
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("api_token is required")
        );
    }

    #[test]
    fn test_builder_requires_user_agent() {
        // Arrange & Act
        let result = TmdbClient::builder().api_token("test-token").build();

        // Assert
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("user_agent is required")
        );
    }

    #[test]
    fn test_builder_defaults_to_tmdb_v3() {
        // Arrange & Act
        let client = TmdbClient::builder()
            .api_token("test-token")
            .user_agent("test/0.0.0")
            .build()
            .unwrap();

        // Assert
        assert_eq!(client.base_url.as_str(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_endpoint_appends_segments() {
        // Arrange
        let client = TmdbClient::builder()
            .api_token("test-token")
            .user_agent("test/0.0.0")
            .build()
            .unwrap();

        // Act
        let url = client.endpoint(&["movie", "popular"]).unwrap();

        // Assert
        assert_eq!(url.as_str(), "https://api.themoviedb.org/3/movie/popular");
    }

    #[test]
    fn test_endpoint_encodes_slash_in_segment() {
        // Arrange
        let client = TmdbClient::builder()
            .base_url(Url::parse("http://localhost:8080/3").unwrap())
            .api_token("test-token")
            .user_agent("test/0.0.0")
            .build()
            .unwrap();

        // Act
        let url = client.endpoint(&["movie", "1/credits"]).unwrap();

        // Assert
        assert_eq!(url.path(), "/3/movie/1%2Fcredits");
    }

    #[tokio::test]
    async fn test_movie_list_via_http() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let body = json!({"page": 2, "results": [{"id": 550, "title": "Fight Club"}]});

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/3/movie/now_playing"))
            .and(wiremock::matchers::query_param("language", "en-US"))
            .and(wiremock::matchers::query_param("page", "2"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, "test-token");

        // Act
        let page = client.movie_list(MovieList::NowPlaying, 2).await.unwrap();

        // Assert
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0]["id"], 550);
    }

    #[tokio::test]
    async fn test_bearer_token_and_accept_are_sent() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::header(
                "Authorization",
                "Bearer my-secret-token",
            ))
            .and(wiremock::matchers::header("Accept", "application/json"))
            .respond_with(
                wiremock::ResponseTemplate::new(200).set_body_json(json!({"genres": []})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, "my-secret-token");

        // Act
        let list = client.movie_genres("en").await;

        // Assert
        assert_eq!(list.unwrap().genres.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_discover_movies_via_http() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/3/discover/movie"))
            .and(wiremock::matchers::query_param("with_genres", "28"))
            .and(wiremock::matchers::query_param("page", "4"))
            .and(wiremock::matchers::query_param("sort_by", "popularity.desc"))
            .respond_with(
                wiremock::ResponseTemplate::new(200)
                    .set_body_json(json!({"results": [{"id": 1}, {"id": 2}]})),
            )
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, "test-token");
        let params = DiscoverMovieParams::new("28");

        // Act
        let page = client.discover_movies(&params, 4).await.unwrap();

        // Assert
        assert_eq!(page.results.len(), 2);
    }

    #[tokio::test]
    async fn test_search_movies_via_http() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/3/search/movie"))
            .and(wiremock::matchers::query_param("query", "blade runner"))
            .and(wiremock::matchers::query_param("include_adult", "false"))
            .respond_with(
                wiremock::ResponseTemplate::new(200).set_body_json(json!({"results": [{"id": 78}]})),
            )
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, "test-token");
        let params = SearchMovieParams::new("blade runner");

        // Act
        let page = client.search_movies(&params, 1).await.unwrap();

        // Assert
        assert_eq!(page.results[0]["id"], 78);
    }

    #[tokio::test]
    async fn test_movie_details_via_http() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/3/movie/550"))
            .and(wiremock::matchers::query_param("language", "en"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_json(
                json!({"id": 550, "title": "Fight Club", "poster_path": "/p.jpg"}),
            ))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, "test-token");

        // Act
        let record = client.movie_details("550", "en").await.unwrap();

        // Assert
        assert_eq!(record["title"], "Fight Club");
    }

    #[tokio::test]
    async fn test_http_error_returns_tmdb_error() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let error_body = r#"{"status_code":7,"status_message":"Invalid API key: You must be granted a valid key.","success":false}"#;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(401).set_body_string(error_body))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, "invalid-token");

        // Act
        let result = client
            .get_json::<MoviePage>(&["movie", "popular"], &[])
            .await;

        // Assert
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("TMDB API error"));
        assert!(err.contains("Invalid API key"));
    }

    #[tokio::test]
    async fn test_http_error_is_not_retried() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(429))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, "test-token");

        // Act
        let page = client.movie_list(MovieList::Popular, 1).await;

        // Assert
        assert!(page.is_none());
    }

    #[tokio::test]
    async fn test_not_found_yields_none() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let error_body = r#"{"status_code":34,"status_message":"The resource you requested could not be found.","success":false}"#;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/3/movie/9999999"))
            .respond_with(wiremock::ResponseTemplate::new(404).set_body_string(error_body))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, "test-token");

        // Act
        let record = client.movie_details("9999999", "en").await;

        // Assert
        assert!(record.is_none());
    }

    #[tokio::test]
    async fn test_malformed_body_yields_none() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, "test-token");

        // Act
        let page = client.movie_list(MovieList::TopRated, 1).await;

        // Assert
        assert!(page.is_none());
    }

    #[tokio::test]
    async fn test_empty_results_is_not_a_failure() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(
                wiremock::ResponseTemplate::new(200).set_body_json(json!({"results": []})),
            )
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, "test-token");

        // Act
        let page = client.movie_list(MovieList::Popular, 1).await;

        // Assert
        assert!(page.is_some());
        assert!(page.unwrap().results.is_empty());
    }
}
