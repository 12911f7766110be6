//! The assembled search pipeline.
//!
//! [`HeroSearch`] owns the input store and spawns three tasks:
//!
//! 1. query builder (debounce + dedupe)
//! 2. query executor (switch-to-latest + replay cache)
//! 3. view projector
//!
//! The presentation layer calls the mutation methods and watches
//! [`HeroSearch::subscribe_view`]. Dropping the handle aborts the tasks.

use crate::config::{ApiCredentials, HeroSearchConfig};
use crate::derived::{ViewState, run_projector};
use crate::error::hero_client::HeroClientError;
use crate::error::pipeline::PipelineError;
use crate::executor::{QueryExecutor, ResponseState};
use crate::hero_client::{HeroSource, MarvelClient};
use crate::input::{InputSnapshot, InputStore};
use crate::query::{DebouncePolicy, QueryBuilder};
use crate::DEFAULT_DEBOUNCE;

use common::{ErrorLocation, RedactedApiKey};
use models::{InputState, ModelError, PageLimit};

use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

const PARAMS_CHANNEL_CAPACITY: usize = 16;

/// Everything the pipeline needs besides the search source.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub api_key: RedactedApiKey,
    pub debounce: Duration,
    pub debounce_policy: DebouncePolicy,
    pub initial_limit: PageLimit,
}

impl PipelineSettings {
    pub fn new(api_key: RedactedApiKey) -> Self {
        Self {
            api_key,
            debounce: DEFAULT_DEBOUNCE,
            debounce_policy: DebouncePolicy::default(),
            initial_limit: PageLimit::default(),
        }
    }

    pub fn from_config(config: &HeroSearchConfig, credentials: &ApiCredentials) -> Self {
        Self {
            api_key: credentials.public_key().clone(),
            debounce: config.search.debounce(),
            debounce_policy: config.search.debounce_policy,
            initial_limit: config.search.default_limit,
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_policy(mut self, policy: DebouncePolicy) -> Self {
        self.debounce_policy = policy;
        self
    }

    pub fn with_initial_limit(mut self, limit: PageLimit) -> Self {
        self.initial_limit = limit;
        self
    }
}

struct PipelineTask {
    name: &'static str,
    handle: JoinHandle<()>,
}

pub struct HeroSearch {
    input: InputStore,
    responses: watch::Receiver<ResponseState>,
    view: watch::Receiver<ViewState>,
    tasks: Vec<PipelineTask>,
}

impl HeroSearch {
    /// Start the pipeline against `source`. Must be called inside a tokio runtime.
    pub fn spawn<S: HeroSource>(settings: PipelineSettings, source: Arc<S>) -> Self {
        let input = InputStore::new(InputState::new(settings.initial_limit));

        let (params_tx, params_rx) = mpsc::channel(PARAMS_CHANNEL_CAPACITY);
        let (executor, responses) = QueryExecutor::new(source);
        let (view_tx, view) = watch::channel(ViewState::Loading);

        let builder = QueryBuilder::new(
            settings.api_key,
            settings.debounce,
            settings.debounce_policy,
        );

        let tasks = vec![
            PipelineTask {
                name: "query-builder",
                handle: tokio::spawn(builder.run(input.subscribe(), params_tx)),
            },
            PipelineTask {
                name: "query-executor",
                handle: tokio::spawn(executor.run(params_rx)),
            },
            PipelineTask {
                name: "view-projector",
                handle: tokio::spawn(run_projector(
                    input.subscribe(),
                    responses.clone(),
                    view_tx,
                )),
            },
        ];

        info!(
            "Hero search pipeline started (limit {}, debounce {:?}, policy {:?})",
            settings.initial_limit, settings.debounce, settings.debounce_policy
        );

        Self {
            input,
            responses,
            view,
            tasks,
        }
    }

    /// Start the pipeline against the Marvel API described by `config`.
    pub fn connect(
        config: &HeroSearchConfig,
        credentials: &ApiCredentials,
    ) -> Result<Self, HeroClientError> {
        let client = MarvelClient::from_config(&config.api)?;
        Ok(Self::spawn(
            PipelineSettings::from_config(config, credentials),
            Arc::new(client),
        ))
    }

    /// Page sizes offered by the limit selector.
    pub fn limits(&self) -> [PageLimit; 3] {
        PageLimit::ALL
    }

    /// Set the search term and go back to the first page.
    pub fn do_search(&self, term: impl Into<String>) {
        self.input.do_search(term);
    }

    /// Move `delta` pages, staying within the pages the last response reported.
    pub fn move_page_by(&self, delta: i64) {
        let total_pages = self
            .view
            .borrow()
            .view_model()
            .map(|view_model| view_model.total_pages);
        self.input.move_page_by(delta, total_pages);
    }

    /// Set the page size and go back to the first page.
    pub fn set_limit(&self, limit: PageLimit) {
        self.input.set_limit(limit);
    }

    /// [`set_limit`](Self::set_limit) from a raw selector value.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnsupportedLimit`] for values outside 10/25/100;
    /// the input is left untouched.
    #[track_caller]
    pub fn set_limit_value(&self, value: u32) -> Result<(), ModelError> {
        let limit = PageLimit::try_from(value)?;
        self.set_limit(limit);
        Ok(())
    }

    pub fn input(&self) -> InputState {
        self.input.current()
    }

    pub fn subscribe_input(&self) -> watch::Receiver<InputSnapshot> {
        self.input.subscribe()
    }

    pub fn subscribe_responses(&self) -> watch::Receiver<ResponseState> {
        self.responses.clone()
    }

    pub fn subscribe_view(&self) -> watch::Receiver<ViewState> {
        self.view.clone()
    }

    pub fn view(&self) -> ViewState {
        self.view.borrow().clone()
    }

    /// Stop all tasks and wait for them to finish.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Task`] for the first task that panicked.
    pub async fn shutdown(mut self) -> Result<(), PipelineError> {
        let tasks = std::mem::take(&mut self.tasks);
        for task in &tasks {
            task.handle.abort();
        }

        let mut first_error = None;
        for task in tasks {
            match task.handle.await {
                Ok(()) => {}
                Err(e) if e.is_cancelled() => {}
                Err(e) => {
                    warn!("Pipeline task {} panicked: {}", task.name, e);
                    first_error.get_or_insert(PipelineError::Task {
                        task: task.name,
                        message: e.to_string(),
                        location: ErrorLocation::caller(),
                    });
                }
            }
        }

        info!("Hero search pipeline stopped");
        first_error.map_or(Ok(()), Err)
    }
}

impl Drop for HeroSearch {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.handle.abort();
        }
    }
}
