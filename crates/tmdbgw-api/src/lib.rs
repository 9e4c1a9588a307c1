//! API client library for tmdbgw.
//!
//! Provides the TMDB API client, the enrichment applied to every movie
//! record, and the sequential page aggregation shared by the list routes.

/// Movie record enrichment (poster URL, streaming links).
pub mod enrich;

/// Sequential multi-page aggregation.
pub mod pages;

/// TMDB API client.
pub mod tmdb;
