//! Query builder: input snapshots in, deduplicated [`QueryParams`] out.
//!
//! # Debounce
//!
//! Search-term and page changes start (or restart) a quiet-period timer; the
//! parameters are built from whatever the input is when it fires. Under
//! [`DebouncePolicy::LimitImmediate`] a page-size change skips the timer and
//! emits at once, cancelling any pending debounced emission (the immediate
//! emission already reflects the newest input). The seed state is always
//! emitted immediately so the first page loads on start-up.
//!
//! # Deduplication
//!
//! A freshly built parameter set equal to the previously emitted one is
//! suppressed, so returning to the same input within or across windows never
//! triggers a second request.

use crate::input::{InputChange, InputSnapshot};

use common::RedactedApiKey;
use models::{InputState, ModelError, PageLimit, QueryParams, QueryParamsBuilder};

use std::time::Duration;

use log::{debug, error, info, trace, warn};
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, watch};
use tokio::time::{Instant, sleep_until};

/// Which input changes wait out the debounce window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebouncePolicy {
    /// Search and page changes are debounced; limit changes go out at once.
    #[default]
    LimitImmediate,
    /// Every change is debounced.
    Uniform,
}

pub struct QueryBuilder {
    api_key: RedactedApiKey,
    window: Duration,
    policy: DebouncePolicy,
    last_emitted: Option<QueryParams>,
    seen_limit: Option<PageLimit>,
}

impl QueryBuilder {
    pub fn new(api_key: RedactedApiKey, window: Duration, policy: DebouncePolicy) -> Self {
        Self {
            api_key,
            window,
            policy,
            last_emitted: None,
            seen_limit: None,
        }
    }

    /// How long a change of this kind waits before emitting; `None` means immediately.
    pub fn delay_for(&self, change: InputChange) -> Option<Duration> {
        match (change, self.policy) {
            (InputChange::Initial, _) => None,
            (InputChange::Limit, DebouncePolicy::LimitImmediate) => None,
            _ => Some(self.window),
        }
    }

    /// Delay for a received snapshot.
    ///
    /// The watch channel only keeps the newest snapshot, so its `change` can
    /// hide an earlier limit change from the same tick. The limit is compared
    /// against the last one seen instead of trusting the cause alone.
    pub fn delay_for_snapshot(&mut self, snapshot: &InputSnapshot) -> Option<Duration> {
        let limit = snapshot.state.limit;
        let limit_changed = self.seen_limit.is_some_and(|seen| seen != limit);
        self.seen_limit = Some(limit);

        if limit_changed {
            self.delay_for(InputChange::Limit)
        } else {
            self.delay_for(snapshot.change)
        }
    }

    #[track_caller]
    pub fn build_params(&self, input: &InputState) -> Result<QueryParams, ModelError> {
        QueryParamsBuilder::default()
            .with_api_key(self.api_key.clone())
            .with_input(input)
            .build()
    }

    /// Build parameters for `input`, or `None` if they equal the last emitted set.
    pub fn next_params(&mut self, input: &InputState) -> Result<Option<QueryParams>, ModelError> {
        let params = self.build_params(input)?;

        if self.last_emitted.as_ref() == Some(&params) {
            return Ok(None);
        }

        self.last_emitted = Some(params.clone());
        Ok(Some(params))
    }

    pub fn last_emitted(&self) -> Option<&QueryParams> {
        self.last_emitted.as_ref()
    }

    /// Drive the builder until the input store or the executor goes away.
    pub async fn run(
        mut self,
        mut input_rx: watch::Receiver<InputSnapshot>,
        params_tx: mpsc::Sender<QueryParams>,
    ) {
        info!(
            "Query builder started (debounce {:?}, policy {:?})",
            self.window, self.policy
        );

        let initial = input_rx.borrow_and_update().clone();
        let mut deadline = match self.delay_for_snapshot(&initial) {
            Some(window) => Some(Instant::now() + window),
            None => {
                if !self.emit(&initial.state, &params_tx).await {
                    return;
                }
                None
            }
        };

        loop {
            tokio::select! {
                changed = input_rx.changed() => {
                    if changed.is_err() {
                        debug!("Input store dropped");
                        break;
                    }

                    let snapshot = input_rx.borrow_and_update().clone();
                    match self.delay_for_snapshot(&snapshot) {
                        None => {
                            if deadline.take().is_some() {
                                trace!("Pending debounced emission superseded by {:?}", snapshot.change);
                            }
                            if !self.emit(&snapshot.state, &params_tx).await {
                                break;
                            }
                        }
                        Some(window) => {
                            trace!("Debounce window (re)started by {:?} at revision {}", snapshot.change, snapshot.revision);
                            deadline = Some(Instant::now() + window);
                        }
                    }
                }
                () = wait_until(deadline) => {
                    deadline = None;
                    let state = input_rx.borrow().state.clone();
                    if !self.emit(&state, &params_tx).await {
                        break;
                    }
                }
            }
        }

        info!("Query builder stopped");
    }

    /// Returns `false` once the executor side of the channel is gone.
    async fn emit(&mut self, input: &InputState, params_tx: &mpsc::Sender<QueryParams>) -> bool {
        match self.next_params(input) {
            Ok(Some(params)) => {
                debug!("Emitting query params {params:?}");
                if params_tx.send(params).await.is_err() {
                    warn!("Query executor gone, stopping query builder");
                    return false;
                }
            }
            Ok(None) => trace!("Suppressed duplicate query params"),
            Err(e) => error!("Failed to build query params: {e}"),
        }
        true
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
