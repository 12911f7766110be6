//! Reactive query-state pipeline for a paginated character search.
//!
//! Three user inputs (search term, page, page size) flow through
//!
//! [`input::InputStore`] → [`query::QueryBuilder`] → [`executor::QueryExecutor`]
//! → [`derived`] projector
//!
//! and come out as a [`derived::ViewState`] the presentation layer binds to.
//! [`pipeline::HeroSearch`] wires the stages together as tokio tasks.

pub mod config;
pub mod derived;
pub mod error;
pub mod executor;
pub mod hero_client;
pub mod input;
pub mod logger;
pub mod pipeline;
pub mod query;

#[cfg(test)]
mod tests;

use std::time::Duration;

pub const MARVEL_API_HOSTNAME: &str = "gateway.marvel.com";
pub const MARVEL_API_BASE_URL: &str = const_format::concatcp!("https://", MARVEL_API_HOSTNAME);
pub const MARVEL_API_VERSION: &str = "v1";
pub const CHARACTERS_ENDPOINT: &str =
    const_format::concatcp!(MARVEL_API_VERSION, "/public/characters");

/// Quiet period after the last search/page change before a request goes out.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);
