//! TMDB API response types and request parameters.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Language sent with list, discover and search requests.
const LIST_LANGUAGE: &str = "en-US";

/// Sort order used by `discover/movie`.
const DISCOVER_SORT_BY: &str = "popularity.desc";

/// An opaque movie detail record, passed through unchanged apart from
/// the fields added by enrichment.
pub type MovieRecord = Map<String, Value>;

// --- Movie lists ---

/// Fixed movie collections served by `movie/{list}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieList {
    /// `movie/popular`
    Popular,
    /// `movie/now_playing`
    NowPlaying,
    /// `movie/top_rated`
    TopRated,
}

impl MovieList {
    /// Upstream path segment for this collection.
    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::Popular => "popular",
            Self::NowPlaying => "now_playing",
            Self::TopRated => "top_rated",
        }
    }

    /// Language sent with every page request of this collection.
    #[must_use]
    pub const fn language(self) -> &'static str {
        LIST_LANGUAGE
    }
}

/// One page of a paginated movie endpoint.
///
/// Only `results` is read; `page`, `total_pages` and the rest of the
/// upstream envelope are ignored. A body without `results` is treated
/// as an empty page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MoviePage {
    /// Movie records in upstream order.
    #[serde(default)]
    pub results: Vec<Value>,
}

/// Response from `genre/movie/list`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenreList {
    /// Genre records (`{id, name}`), absent when upstream omits them.
    #[serde(default)]
    pub genres: Option<Vec<Value>>,
}

/// Error body returned by TMDB on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbErrorResponse {
    /// TMDB status code (not the HTTP status).
    pub status_code: u32,
    /// Human-readable message.
    pub status_message: String,
    /// Always `false` for errors.
    #[serde(default)]
    pub success: bool,
}

// --- Discover ---

/// Parameters for `discover/movie`, minus the page number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoverMovieParams {
    /// Genre filter, forwarded verbatim as `with_genres`.
    pub genre_id: String,
    /// Response language.
    pub language: String,
    /// Include adult titles.
    pub include_adult: bool,
    /// Include video-only entries.
    pub include_video: bool,
    /// Sort order.
    pub sort_by: String,
}

impl DiscoverMovieParams {
    /// Creates params for the given genre with the gateway defaults.
    #[must_use]
    pub fn new(genre_id: impl Into<String>) -> Self {
        Self {
            genre_id: genre_id.into(),
            language: String::from(LIST_LANGUAGE),
            include_adult: false,
            include_video: false,
            sort_by: String::from(DISCOVER_SORT_BY),
        }
    }

    /// Builds the query pairs for one page.
    pub(crate) fn to_query(&self, page: u32) -> Vec<(&'static str, String)> {
        vec![
            ("include_adult", self.include_adult.to_string()),
            ("include_video", self.include_video.to_string()),
            ("language", self.language.clone()),
            ("page", page.to_string()),
            ("sort_by", self.sort_by.clone()),
            ("with_genres", self.genre_id.clone()),
        ]
    }
}

// --- Search ---

/// Parameters for `search/movie`, minus the page number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMovieParams {
    /// Search query.
    pub query: String,
    /// Response language.
    pub language: String,
    /// Include adult titles.
    pub include_adult: bool,
}

impl SearchMovieParams {
    /// Creates params for the given query with the gateway defaults.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            language: String::from(LIST_LANGUAGE),
            include_adult: false,
        }
    }

    /// Builds the query pairs for one page.
    pub(crate) fn to_query(&self, page: u32) -> Vec<(&'static str, String)> {
        vec![
            ("query", self.query.clone()),
            ("include_adult", self.include_adult.to_string()),
            ("language", self.language.clone()),
            ("page", page.to_string()),
        ]
    }
}
