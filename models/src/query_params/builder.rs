use crate::error::model_error::ModelError;
use crate::{InputState, PageLimit, QueryParams};

use common::{ErrorLocation, RedactedApiKey};

/// Builder for validated [`QueryParams`].
///
/// Computes `offset = page * limit` and drops an empty search term, so every
/// caller derives the same canonical value from the same inputs.
#[derive(Debug, Default)]
pub struct QueryParamsBuilder {
    api_key: Option<RedactedApiKey>,
    search_term: Option<String>,
    page: Option<u32>,
    limit: Option<PageLimit>,
}

impl QueryParamsBuilder {
    pub fn with_api_key(mut self, api_key: RedactedApiKey) -> Self {
        self.api_key = Some(api_key);
        self
    }

    pub fn with_search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_limit(mut self, limit: PageLimit) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Seed search term, page and limit from an input snapshot.
    pub fn with_input(self, input: &InputState) -> Self {
        self.with_search_term(input.search_term.clone())
            .with_page(input.page)
            .with_limit(input.limit)
    }

    /// Build the QueryParams with validation.
    #[track_caller]
    pub fn build(self) -> Result<QueryParams, ModelError> {
        let api_key = self.api_key.ok_or_else(|| ModelError::Validation {
            message: String::from("API key is required"),
            location: ErrorLocation::caller(),
        })?;

        if api_key.is_empty() {
            return Err(ModelError::Validation {
                message: String::from("API key cannot be empty"),
                location: ErrorLocation::caller(),
            });
        }

        let limit = self.limit.ok_or_else(|| ModelError::Validation {
            message: String::from("Limit is required"),
            location: ErrorLocation::caller(),
        })?;

        let page = self.page.unwrap_or_default();

        let name_starts_with = self.search_term.filter(|term| !term.is_empty());

        Ok(QueryParams {
            api_key,
            limit: limit.value(),
            offset: u64::from(page) * u64::from(limit.value()),
            name_starts_with,
        })
    }
}
