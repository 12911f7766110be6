//! Query executor: one request per distinct parameter set, latest wins.
//!
//! # Switch-to-latest
//!
//! Each incoming [`QueryParams`] gets a new generation number. The previous
//! request task is aborted, and any completion that still arrives for an
//! older generation is dropped, so only the response to the most recently
//! issued parameter set reaches subscribers.
//!
//! # Replay cache
//!
//! Results land in a single-slot `watch` channel. A new subscriber reads the
//! latest [`ResponseState`] immediately; subscribing never triggers a request.

use crate::error::hero_client::HeroClientError;
use crate::hero_client::HeroSource;

use models::{QueryParams, RawResponse};

use std::sync::Arc;

use log::{debug, info, trace, warn};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

const COMPLETION_CHANNEL_CAPACITY: usize = 16;

/// Latest outcome of the search, as cached for every consumer.
#[derive(Debug, Clone, Default)]
pub enum ResponseState {
    /// Nothing requested yet.
    #[default]
    Idle,

    /// A request for `params` is in flight; `last` is the previous good response.
    Loading {
        params: QueryParams,
        last: Option<Arc<RawResponse>>,
    },

    Loaded {
        params: QueryParams,
        response: Arc<RawResponse>,
    },

    /// The request for `params` failed; `last` keeps the previous good response.
    Failed {
        params: QueryParams,
        error: Arc<HeroClientError>,
        last: Option<Arc<RawResponse>>,
    },
}

impl ResponseState {
    /// Most recent successful response, whether or not it is still current.
    pub fn latest_response(&self) -> Option<&Arc<RawResponse>> {
        match self {
            ResponseState::Idle => None,
            ResponseState::Loading { last, .. } | ResponseState::Failed { last, .. } => {
                last.as_ref()
            }
            ResponseState::Loaded { response, .. } => Some(response),
        }
    }

    /// Parameter set this state belongs to.
    pub fn params(&self) -> Option<&QueryParams> {
        match self {
            ResponseState::Idle => None,
            ResponseState::Loading { params, .. }
            | ResponseState::Loaded { params, .. }
            | ResponseState::Failed { params, .. } => Some(params),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ResponseState::Loading { .. })
    }

    pub fn error(&self) -> Option<&Arc<HeroClientError>> {
        match self {
            ResponseState::Failed { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Result of one request task, tagged with the generation it was issued under.
#[derive(Debug)]
pub(crate) struct Completion {
    pub(crate) generation: u64,
    pub(crate) params: QueryParams,
    pub(crate) result: Result<RawResponse, HeroClientError>,
}

pub struct QueryExecutor<S> {
    source: Arc<S>,
    cache: watch::Sender<ResponseState>,
}

impl<S: HeroSource> QueryExecutor<S> {
    /// Create an executor and the receiver side of its response cache.
    pub fn new(source: Arc<S>) -> (Self, watch::Receiver<ResponseState>) {
        let (cache, receiver) = watch::channel(ResponseState::Idle);
        (Self { source, cache }, receiver)
    }

    pub fn subscribe(&self) -> watch::Receiver<ResponseState> {
        self.cache.subscribe()
    }

    /// Process parameter sets until the query builder goes away.
    pub async fn run(self, mut params_rx: mpsc::Receiver<QueryParams>) {
        info!("Query executor started");

        let (done_tx, mut done_rx) = mpsc::channel::<Completion>(COMPLETION_CHANNEL_CAPACITY);
        let mut generation: u64 = 0;
        let mut in_flight: Option<JoinHandle<()>> = None;

        loop {
            tokio::select! {
                next = params_rx.recv() => {
                    let Some(params) = next else {
                        debug!("Query builder dropped");
                        break;
                    };

                    generation += 1;
                    if let Some(handle) = in_flight.take() {
                        if !handle.is_finished() {
                            debug!("Request generation {} superseded", generation - 1);
                        }
                        handle.abort();
                    }

                    self.cache.send_modify(|state| {
                        let last = state.latest_response().cloned();
                        *state = ResponseState::Loading {
                            params: params.clone(),
                            last,
                        };
                    });

                    in_flight = Some(self.dispatch(generation, params, done_tx.clone()));
                }
                Some(completion) = done_rx.recv() => {
                    if accept_completion(&self.cache, completion, generation) {
                        in_flight = None;
                    }
                }
            }
        }

        if let Some(handle) = in_flight {
            handle.abort();
        }
        info!("Query executor stopped");
    }

    fn dispatch(
        &self,
        generation: u64,
        params: QueryParams,
        done_tx: mpsc::Sender<Completion>,
    ) -> JoinHandle<()> {
        let source = Arc::clone(&self.source);

        tokio::spawn(async move {
            debug!("Issuing search request generation {generation}");
            let result = source.search(&params).await;

            let completion = Completion {
                generation,
                params,
                result,
            };
            if done_tx.send(completion).await.is_err() {
                trace!("Executor gone before request generation {generation} completed");
            }
        })
    }
}

/// Publish `completion` if it belongs to `current_generation`.
///
/// Returns `false` (and publishes nothing) for a stale completion.
pub(crate) fn accept_completion(
    cache: &watch::Sender<ResponseState>,
    completion: Completion,
    current_generation: u64,
) -> bool {
    if completion.generation != current_generation {
        debug!(
            "Discarding stale response for generation {} (current {})",
            completion.generation, current_generation
        );
        return false;
    }

    let Completion { params, result, .. } = completion;
    match result {
        Ok(response) => {
            debug!(
                "Search generation {current_generation} delivered {} of {} results",
                response.results.len(),
                response.total
            );
            cache.send_replace(ResponseState::Loaded {
                params,
                response: Arc::new(response),
            });
        }
        Err(error) => {
            warn!("Search generation {current_generation} failed: {error}");
            cache.send_modify(|state| {
                let last = state.latest_response().cloned();
                *state = ResponseState::Failed {
                    params,
                    error: Arc::new(error),
                    last,
                };
            });
        }
    }
    true
}
