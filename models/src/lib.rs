//! Domain models for hero search.
//!
//! Pure data passed between the layers of the search pipeline. Models carry
//! validation but no reactive behaviour: the pipeline that mutates, debounces,
//! fetches and projects them lives in `hero-core`.
//!
//! ## Architecture
//!
//! - **common**: location tracking, redacted credentials, status codes
//! - **models** (this crate): input state, query parameters, API payloads, view model
//! - **hero-core**: the reactive query-state pipeline operating on these models

pub mod error;
pub mod hero;
pub mod input_state;
pub mod query_params;
pub mod raw_response;
pub mod view_model;

pub use error::model_error::ModelError;
pub use hero::{Hero, HeroSubItem, HeroSubItems, HeroThumbnail};
pub use input_state::{InputState, PageLimit};
pub use query_params::QueryParams;
pub use query_params::builder::QueryParamsBuilder;
pub use raw_response::{HeroDataWrapper, RawResponse};
pub use view_model::ViewModel;

#[cfg(test)]
mod tests;
