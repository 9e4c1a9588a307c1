//! Route handlers.

/// `GET /` identity payload.
pub mod index;
/// `/api/v1/movies/...` routes.
pub mod movies;
