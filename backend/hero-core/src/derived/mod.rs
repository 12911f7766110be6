//! Derived state: the view the presentation layer binds to.
//!
//! A pure projection of the current [`InputState`] and the cached
//! [`ResponseState`], recomputed whenever either changes.

use crate::executor::ResponseState;
use crate::input::InputSnapshot;

use models::{InputState, PageLimit, RawResponse, ViewModel};

use log::{debug, info};
use serde::Serialize;
use tokio::sync::watch;

/// `ceil(total_results / limit)`. Zero results means zero pages.
pub fn total_pages(total_results: u64, limit: PageLimit) -> u64 {
    total_results.div_ceil(u64::from(limit.value()))
}

/// Project a response against the current input.
///
/// `disable_next` uses `>=` so an empty result set (zero pages, display page 1)
/// also disables "next".
pub fn project(input: &InputState, response: &RawResponse) -> ViewModel {
    let total_pages = total_pages(response.total, input.limit);
    let display_page = input.display_page();

    ViewModel {
        heroes: response.results.clone(),
        search: input.search_term.clone(),
        display_page,
        limit: input.limit.value(),
        total_results: response.total,
        total_pages,
        disable_next: u64::from(display_page) >= total_pages,
        disable_previous: display_page == 1,
    }
}

/// What the presentation layer renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "camelCase")]
pub enum ViewState {
    /// No response has arrived yet.
    Loading,

    Ready(ViewModel),

    /// The latest request failed. `last` is the previous good data,
    /// re-projected against the current input.
    Failed {
        message: String,
        status: Option<u16>,
        last: Option<ViewModel>,
    },
}

impl ViewState {
    pub fn derive(input: &InputState, response: &ResponseState) -> Self {
        match response {
            ResponseState::Failed { error, last, .. } => ViewState::Failed {
                message: error.to_string(),
                status: error.status().map(|status| status.0),
                last: last.as_deref().map(|last| project(input, last)),
            },
            other => match other.latest_response() {
                Some(response) => ViewState::Ready(project(input, response)),
                None => ViewState::Loading,
            },
        }
    }

    /// Current or last-known view model.
    pub fn view_model(&self) -> Option<&ViewModel> {
        match self {
            ViewState::Loading => None,
            ViewState::Ready(view_model) => Some(view_model),
            ViewState::Failed { last, .. } => last.as_ref(),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ViewState::Failed { .. })
    }
}

/// Recompute the view whenever the input or the response cache changes.
///
/// Publishes only when the derived value differs from the current one.
pub async fn run_projector(
    mut input_rx: watch::Receiver<InputSnapshot>,
    mut response_rx: watch::Receiver<ResponseState>,
    view_tx: watch::Sender<ViewState>,
) {
    info!("View projector started");

    loop {
        let next = {
            let input = input_rx.borrow_and_update();
            let response = response_rx.borrow_and_update();
            ViewState::derive(&input.state, &response)
        };

        let published = view_tx.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            *current = next;
            true
        });
        if published {
            debug!("View state republished");
        }

        tokio::select! {
            changed = input_rx.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            changed = response_rx.changed() => {
                if changed.is_err() {
                    break;
                }
            }
        }
    }

    info!("View projector stopped");
}
