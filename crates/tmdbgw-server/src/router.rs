//! Route table.

use axum::Router;
use axum::routing::{MethodRouter, get};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::error::{details_panic_response, panic_response};
use crate::handlers::{index, movies};
use crate::state::AppState;

/// Prefix every movie route is mounted under.
pub const API_PREFIX: &str = "/api/v1";

/// Builds the gateway router.
pub fn create_router(state: AppState) -> Router {
    let movie_routes = Router::new()
        .route("/movies/popular", get(movies::popular))
        .route("/movies/now_playing", get(movies::now_playing))
        .route("/movies/top-rated", get(movies::top_rated))
        .route("/movies/genres", get(movies::genres))
        .route("/movies/genres/{genre_id}", get(movies::genre_movies))
        .route("/movies/search", get(movies::search))
        .route("/movies/{id}", guard_details(get(movies::details)));

    mount(movie_routes).with_state(state)
}

/// Answers a panic inside the detail handler with its own 500 message.
fn guard_details(route: MethodRouter<AppState>) -> MethodRouter<AppState> {
    route.layer(CatchPanicLayer::custom(details_panic_response))
}

/// Puts the movie routes under `API_PREFIX` next to `GET /` and wraps
/// everything in the panic catcher and request tracing.
fn mount(movie_routes: Router<AppState>) -> Router<AppState> {
    Router::new()
        .route("/", get(index::service_info))
        .nest(API_PREFIX, movie_routes)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
}
