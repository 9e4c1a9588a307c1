//! TMDB API client module.
//!
//! Handles authenticated GET requests to the TMDB API v3 movie endpoints.
//! Every endpoint reports failure as `None` after logging it, so callers
//! can tell an upstream error apart from an empty result.

mod api;
mod client;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTmdbApi, TmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{DEFAULT_BASE_URL, TmdbClient, TmdbClientBuilder};
#[allow(clippy::module_name_repetitions)]
pub use types::{
    DiscoverMovieParams, GenreList, MovieList, MoviePage, MovieRecord, SearchMovieParams,
    TmdbErrorResponse,
};
