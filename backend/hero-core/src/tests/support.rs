// Shared fakes for the pipeline unit tests.

use crate::error::hero_client::HeroClientError;
use crate::hero_client::HeroSource;

use common::{ErrorLocation, HttpStatusCode, RedactedApiKey};
use models::{Hero, HeroSubItems, HeroThumbnail, PageLimit, QueryParams, QueryParamsBuilder, RawResponse};

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

pub(crate) const TEST_API_KEY: &str = "test-public-key";

pub(crate) fn api_key() -> RedactedApiKey {
    RedactedApiKey::new(TEST_API_KEY)
}

pub(crate) fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

pub(crate) fn params(term: &str, page: u32, limit: PageLimit) -> QueryParams {
    QueryParamsBuilder::default()
        .with_api_key(api_key())
        .with_search_term(term)
        .with_page(page)
        .with_limit(limit)
        .build()
        .unwrap()
}

/// Name given to the single hero a [`FakeSource`] answers with, so tests can
/// tell which request a response belongs to.
pub(crate) fn label(params: &QueryParams) -> String {
    format!(
        "{}@{}",
        params.name_starts_with.as_deref().unwrap_or(""),
        params.offset
    )
}

pub(crate) fn hero(id: u64, name: &str) -> Hero {
    Hero {
        id,
        name: name.to_string(),
        description: None,
        thumbnail: HeroThumbnail::default(),
        resource_uri: format!("http://gateway.marvel.com/v1/public/characters/{id}"),
        comics: HeroSubItems::default(),
        events: HeroSubItems::default(),
        series: HeroSubItems::default(),
        stories: HeroSubItems::default(),
    }
}

/// In-memory search source with scripted latency and failures.
pub(crate) struct FakeSource {
    calls: Mutex<Vec<QueryParams>>,
    latencies: Mutex<VecDeque<Duration>>,
    total: u64,
    failing_term: Option<String>,
}

impl FakeSource {
    pub(crate) fn new(total: u64) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            latencies: Mutex::new(VecDeque::new()),
            total,
            failing_term: None,
        }
    }

    /// Latency of each call, in call order. Calls past the end answer at once.
    pub(crate) fn with_latencies(self, latencies: Vec<Duration>) -> Self {
        *self.latencies.lock().unwrap() = latencies.into();
        self
    }

    /// Answer HTTP 503 whenever the search term equals `term`.
    pub(crate) fn failing_for(mut self, term: &str) -> Self {
        self.failing_term = Some(term.to_string());
        self
    }

    pub(crate) fn calls(&self) -> Vec<QueryParams> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn last_call(&self) -> Option<QueryParams> {
        self.calls.lock().unwrap().last().cloned()
    }
}

impl HeroSource for FakeSource {
    async fn search(&self, params: &QueryParams) -> Result<RawResponse, HeroClientError> {
        let latency = {
            self.calls.lock().unwrap().push(params.clone());
            self.latencies.lock().unwrap().pop_front().unwrap_or_default()
        };

        tokio::time::sleep(latency).await;

        if self.failing_term.is_some() && params.name_starts_with == self.failing_term {
            return Err(HeroClientError::Server {
                status: HttpStatusCode(503),
                message: String::from("upstream unavailable"),
                location: ErrorLocation::caller(),
            });
        }

        Ok(RawResponse {
            total: self.total,
            results: vec![hero(params.offset, &label(params))],
        })
    }
}
