//! Shared, read-only state handed to every route handler.

use std::sync::Arc;

use tmdbgw_api::enrich::Enricher;
use tmdbgw_api::tmdb::TmdbClient;

/// Gateway state, built once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Upstream TMDB client.
    pub tmdb: Arc<TmdbClient>,
    /// Record enricher (image CDN base).
    pub enricher: Arc<Enricher>,
}

impl AppState {
    /// Wraps the client and enricher for sharing across requests.
    pub fn new(tmdb: TmdbClient, enricher: Enricher) -> Self {
        Self {
            tmdb: Arc::new(tmdb),
            enricher: Arc::new(enricher),
        }
    }
}
