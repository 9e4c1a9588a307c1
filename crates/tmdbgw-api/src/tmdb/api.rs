//! `TmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use super::types::{
    DiscoverMovieParams, GenreList, MovieList, MoviePage, MovieRecord, SearchMovieParams,
};

/// TMDB API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
///
/// Every method returns `None` when the upstream call failed for any
/// reason; the failure has already been logged by the implementation.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(TmdbApi: Send)]
pub trait LocalTmdbApi {
    /// Fetches one page of a fixed movie collection.
    async fn movie_list(&self, list: MovieList, page: u32) -> Option<MoviePage>;

    /// Fetches one page of `discover/movie`.
    async fn discover_movies(&self, params: &DiscoverMovieParams, page: u32)
    -> Option<MoviePage>;

    /// Fetches one page of `search/movie`.
    async fn search_movies(&self, params: &SearchMovieParams, page: u32) -> Option<MoviePage>;

    /// Fetches the movie genre list.
    async fn movie_genres(&self, language: &str) -> Option<GenreList>;

    /// Fetches a single movie's details.
    async fn movie_details(&self, movie_id: &str, language: &str) -> Option<MovieRecord>;
}
