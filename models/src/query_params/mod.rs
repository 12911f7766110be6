pub mod builder;

use common::RedactedApiKey;

pub const API_KEY_PARAM: &str = "apikey";
pub const LIMIT_PARAM: &str = "limit";
pub const OFFSET_PARAM: &str = "offset";
pub const NAME_STARTS_WITH_PARAM: &str = "nameStartsWith";

/// Canonical parameter set for one search request.
///
/// Compared structurally: two values built from equivalent inputs are equal,
/// which is what lets the query builder suppress redundant requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams {
    pub api_key: RedactedApiKey,
    pub limit: u32,
    pub offset: u64,
    /// Present only for a non-empty search term.
    pub name_starts_with: Option<String>,
}

impl QueryParams {
    /// Query string pairs in wire order.
    ///
    /// Contains the raw API key; never log the result.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            (API_KEY_PARAM, self.api_key.as_str().to_string()),
            (LIMIT_PARAM, self.limit.to_string()),
            (OFFSET_PARAM, self.offset.to_string()),
        ];
        if let Some(ref name) = self.name_starts_with {
            pairs.push((NAME_STARTS_WITH_PARAM, name.clone()));
        }
        pairs
    }
}
