use crate::Hero;

use serde::Serialize;

/// Display-ready projection of the latest response and the current input.
///
/// Never mutated directly; `hero-core` recomputes it whenever the input or the
/// cached response changes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewModel {
    pub heroes: Vec<Hero>,
    pub search: String,
    /// One-based.
    pub display_page: u32,
    pub limit: u32,
    pub total_results: u64,
    pub total_pages: u64,
    pub disable_next: bool,
    pub disable_previous: bool,
}
