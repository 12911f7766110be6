//! Outbound search API.
//!
//! [`HeroSource`] is the seam between the pipeline and the network; the
//! executor only ever sees this trait. [`MarvelClient`] is the reqwest-backed
//! implementation talking to the characters endpoint.

use crate::CHARACTERS_ENDPOINT;
use crate::config::ApiConfig;
use crate::error::hero_client::HeroClientError;

use common::{ErrorLocation, HttpStatusCode};
use models::{HeroDataWrapper, QueryParams, RawResponse};

use std::future::Future;
use std::time::Duration;

use log::{debug, trace};
use reqwest::Client;
use url::Url;

const DEFAULT_TIMEOUT_DURATION: Duration = Duration::from_secs(30);

/// Something that can answer one search request.
pub trait HeroSource: Send + Sync + 'static {
    fn search(
        &self,
        params: &QueryParams,
    ) -> impl Future<Output = Result<RawResponse, HeroClientError>> + Send;
}

#[derive(Clone)]
pub struct MarvelClient {
    characters_url: Url,
    client: Client,
}

impl MarvelClient {
    pub fn new(base_url_str: &str) -> Result<Self, HeroClientError> {
        Self::with_timeout(base_url_str, DEFAULT_TIMEOUT_DURATION)
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, HeroClientError> {
        Self::with_timeout(&config.base_url, config.request_timeout())
    }

    pub fn with_timeout(base_url_str: &str, timeout: Duration) -> Result<Self, HeroClientError> {
        let mut base_url = Url::parse(base_url_str)?;

        // Without a trailing slash `join` would replace the last path segment.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let characters_url = base_url.join(CHARACTERS_ENDPOINT)?;
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            characters_url,
            client,
        })
    }

    /// Full request URL for a parameter set. Contains the API key.
    pub fn request_url(&self, params: &QueryParams) -> Url {
        let mut url = self.characters_url.clone();
        url.query_pairs_mut().extend_pairs(params.query_pairs());
        url
    }

    pub fn characters_url(&self) -> &Url {
        &self.characters_url
    }
}

impl HeroSource for MarvelClient {
    async fn search(&self, params: &QueryParams) -> Result<RawResponse, HeroClientError> {
        debug!(
            "GET {} limit={} offset={} nameStartsWith={:?}",
            self.characters_url, params.limit, params.offset, params.name_starts_with
        );

        let response = self.client.get(self.request_url(params)).send().await?;
        let status = HttpStatusCode::from(response.status().as_u16());

        if !status.is_success() {
            return Err(HeroClientError::Server {
                status,
                message: response.text().await.unwrap_or_default(),
                location: ErrorLocation::caller(),
            });
        }

        let body = response.bytes().await?;
        let wrapper: HeroDataWrapper = serde_json::from_slice(&body)?;

        trace!(
            "Search answered {} of {} results",
            wrapper.data.results.len(),
            wrapper.data.total
        );

        Ok(wrapper.into())
    }
}
