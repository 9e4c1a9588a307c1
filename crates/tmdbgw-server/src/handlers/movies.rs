//! Movie routes: curated lists, genres, discovery, search and details.

use std::ops::RangeInclusive;

use axum::Json;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use serde_json::Value;
use tmdbgw_api::enrich::Enrichment;
use tmdbgw_api::pages::{FIXED_PAGES, PAGES_PER_REQUEST, collect_pages, page_window};
use tmdbgw_api::tmdb::{
    DiscoverMovieParams, LocalTmdbApi, MovieList, MovieRecord, SearchMovieParams,
};
use tracing::instrument;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Language for the genre list and the detail lookup.
const DETAIL_LANGUAGE: &str = "en";

const GENRES_MISSING: &str = "Failed to fetch genres or genres are missing from response";
const QUERY_REQUIRED: &str = "Query parameter is required";
const MOVIE_NOT_FOUND: &str = "Movie not found";

/// Query string of `GET /movies/genres/{genre_id}`.
#[derive(Debug, Deserialize)]
pub struct GenrePageQuery {
    /// First upstream page of the window, 1 when absent. Kept as text so a
    /// non-numeric value selects no pages instead of being rejected.
    pub page: Option<String>,
}

/// Query string of `GET /movies/search`.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Free-text title search.
    pub query: Option<String>,
}

async fn curated_list(state: &AppState, list: MovieList) -> Json<Vec<Value>> {
    let tmdb = &*state.tmdb;
    let movies = collect_pages(
        FIXED_PAGES,
        |page| tmdb.movie_list(list, page),
        &state.enricher,
        Enrichment::Full,
    )
    .await;
    Json(movies)
}

/// `GET /movies/popular`
#[instrument(skip_all)]
pub async fn popular(State(state): State<AppState>) -> Json<Vec<Value>> {
    curated_list(&state, MovieList::Popular).await
}

/// `GET /movies/now_playing`
#[instrument(skip_all)]
pub async fn now_playing(State(state): State<AppState>) -> Json<Vec<Value>> {
    curated_list(&state, MovieList::NowPlaying).await
}

/// `GET /movies/top-rated`
#[instrument(skip_all)]
pub async fn top_rated(State(state): State<AppState>) -> Json<Vec<Value>> {
    curated_list(&state, MovieList::TopRated).await
}

/// `GET /movies/genres` - the upstream genre array, unmodified.
///
/// # Errors
///
/// Returns 500 when the upstream call fails or carries no `genres`.
#[instrument(skip_all)]
pub async fn genres(State(state): State<AppState>) -> ApiResult<Json<Vec<Value>>> {
    state
        .tmdb
        .movie_genres(DETAIL_LANGUAGE)
        .await
        .and_then(|list| list.genres)
        .map(Json)
        .ok_or(ApiError::Internal(GENRES_MISSING))
}

/// `GET /movies/genres/{genre_id}?page=N` - five discovery pages from `N`.
///
/// Pages TMDB refuses (such as page 0) are skipped like any other failed
/// page; a `page` that is not an integer yields an empty array without
/// calling upstream.
///
/// # Errors
///
/// Returns 400 only when the path or query string cannot be decoded.
#[instrument(skip_all)]
pub async fn genre_movies(
    State(state): State<AppState>,
    genre_id: Result<Path<String>, PathRejection>,
    query: Result<Query<GenrePageQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Value>>> {
    let Path(genre_id) = genre_id?;
    let Query(query) = query?;
    let Some(pages) = genre_window(query.page.as_deref()) else {
        tracing::debug!(page = ?query.page, "Page is not an integer, nothing to fetch");
        return Ok(Json(Vec::new()));
    };
    let params = DiscoverMovieParams::new(genre_id);
    let tmdb = &*state.tmdb;
    let movies = collect_pages(
        pages,
        |page| tmdb.discover_movies(&params, page),
        &state.enricher,
        Enrichment::PosterOnly,
    )
    .await;
    Ok(Json(movies))
}

/// `GET /movies/search?query=Q` - five search pages.
///
/// # Errors
///
/// Returns 400 before any upstream call when `query` is missing, empty or
/// not decodable.
#[instrument(skip_all)]
pub async fn search(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Value>>> {
    let Query(query) = query?;
    let Some(text) = query.query.filter(|q| !q.is_empty()) else {
        return Err(ApiError::BadRequest(QUERY_REQUIRED));
    };
    let params = SearchMovieParams::new(text);
    let tmdb = &*state.tmdb;
    let movies = collect_pages(
        FIXED_PAGES,
        |page| tmdb.search_movies(&params, page),
        &state.enricher,
        Enrichment::PosterOnly,
    )
    .await;
    Ok(Json(movies))
}

/// `GET /movies/{id}` - one fully enriched movie record.
///
/// # Errors
///
/// Returns 404 when TMDB yields no data for the id.
#[instrument(skip_all)]
pub async fn details(
    State(state): State<AppState>,
    movie_id: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<MovieRecord>> {
    let Path(movie_id) = movie_id?;
    let record = state
        .tmdb
        .movie_details(&movie_id, DETAIL_LANGUAGE)
        .await
        .ok_or(ApiError::NotFound(MOVIE_NOT_FOUND))?;
    Ok(Json(state.enricher.enrich_record(record, Enrichment::Full)))
}

/// Resolves the `page` query value into the upstream pages to request.
///
/// Absent means page 1 and blank means page 0. Pages below 0 are cut from
/// the window. `None` when the value is not an integer.
fn genre_window(raw: Option<&str>) -> Option<RangeInclusive<u32>> {
    let Some(raw) = raw else {
        return Some(page_window(1));
    };
    let trimmed = raw.trim();
    let start = if trimmed.is_empty() {
        0
    } else {
        trimmed.parse::<i64>().ok()?
    };

    if start >= 0 {
        return u32::try_from(start).ok().map(page_window);
    }
    let last = start.saturating_add(i64::from(PAGES_PER_REQUEST.saturating_sub(1)));
    u32::try_from(last).ok().map(|last| 0..=last)
}
