use crate::Hero;

use serde::{Deserialize, Serialize};

/// The part of a search response the pipeline consumes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawResponse {
    pub total: u64,
    #[serde(default)]
    pub results: Vec<Hero>,
}

/// Wire envelope: `{ "data": { "total": .., "results": [..] } }`.
///
/// The API also sends `code`, `status`, `attributionText` and paging echoes;
/// only `data` is required.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroDataWrapper {
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(default)]
    pub attribution_text: Option<String>,
    pub data: RawResponse,
}

impl From<HeroDataWrapper> for RawResponse {
    fn from(wrapper: HeroDataWrapper) -> Self {
        wrapper.data
    }
}
