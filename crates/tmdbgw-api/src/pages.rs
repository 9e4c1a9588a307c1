//! Sequential multi-page aggregation.

use std::future::Future;
use std::ops::RangeInclusive;

use serde_json::Value;
use tracing::instrument;

use crate::enrich::{Enricher, Enrichment};
use crate::tmdb::MoviePage;

/// Number of upstream pages fetched per aggregated request.
pub const PAGES_PER_REQUEST: u32 = 5;

/// Pages fetched by the routes that always start at page 1.
pub const FIXED_PAGES: RangeInclusive<u32> = 1..=PAGES_PER_REQUEST;

/// Returns `PAGES_PER_REQUEST` consecutive pages starting at `start`,
/// saturating at `u32::MAX`.
#[must_use]
pub const fn page_window(start: u32) -> RangeInclusive<u32> {
    start..=start.saturating_add(PAGES_PER_REQUEST.saturating_sub(1))
}

/// Fetches `pages` one after another and returns every enriched item.
///
/// Each page is awaited to completion before the next one is requested.
/// A page whose fetch returns `None` contributes nothing and the caller
/// is not told. Items keep upstream order within a page and pages keep
/// ascending order; duplicates across pages are kept.
#[instrument(skip(fetch_page, enricher))]
pub async fn collect_pages<F, Fut>(
    pages: RangeInclusive<u32>,
    mut fetch_page: F,
    enricher: &Enricher,
    enrichment: Enrichment,
) -> Vec<Value>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Option<MoviePage>>,
{
    let mut movies: Vec<Value> = Vec::new();

    for page in pages {
        let Some(data) = fetch_page(page).await else {
            tracing::warn!(page, "Skipping page with no data from TMDB");
            continue;
        };

        movies.extend(
            data.results
                .into_iter()
                .map(|movie| enricher.enrich(movie, enrichment)),
        );
    }

    tracing::debug!(count = movies.len(), "Collected movies");
    movies
}
