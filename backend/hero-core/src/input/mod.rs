//! Input state store.
//!
//! Holds the current [`InputState`] and publishes every change through a
//! `watch` channel, so subscribers always observe the latest composite value
//! together with what caused it.
//!
//! # Mutations
//!
//! All mutations are [`InputCommand`] values applied synchronously with
//! last-write-wins semantics:
//!
//! - `Search` sets the term and resets the page to 0
//! - `MovePageBy` shifts the page, clamped to the known page range
//! - `SetLimit` sets the page size and resets the page to 0
//!
//! A command that leaves the state unchanged publishes nothing.

use models::{InputState, PageLimit};

use std::sync::Arc;

use log::{debug, trace};
use tokio::sync::watch;

/// What caused the latest input snapshot.
///
/// The query builder uses this to decide whether to debounce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputChange {
    /// Seed value the store was created with.
    Initial,
    Search,
    Page,
    Limit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSnapshot {
    pub state: InputState,
    pub change: InputChange,
    /// Incremented on every published change.
    pub revision: u64,
}

/// Commands that mutate input state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    Search(String),

    /// `total_pages` is the last known page count, if any; it bounds the move.
    MovePageBy { delta: i64, total_pages: Option<u64> },

    SetLimit(PageLimit),
}

impl InputCommand {
    pub fn change(&self) -> InputChange {
        match self {
            InputCommand::Search(_) => InputChange::Search,
            InputCommand::MovePageBy { .. } => InputChange::Page,
            InputCommand::SetLimit(_) => InputChange::Limit,
        }
    }

    /// The state after applying this command to `state`.
    pub fn apply(&self, state: &InputState) -> InputState {
        match self {
            InputCommand::Search(term) => InputState {
                search_term: term.clone(),
                page: 0,
                limit: state.limit,
            },
            InputCommand::MovePageBy { delta, total_pages } => InputState {
                page: clamp_page(state.page, *delta, *total_pages),
                ..state.clone()
            },
            InputCommand::SetLimit(limit) => InputState {
                search_term: state.search_term.clone(),
                page: 0,
                limit: *limit,
            },
        }
    }
}

/// `current + delta`, kept within `[0, total_pages - 1]`.
///
/// With no known page count only the lower bound applies. A known count of
/// zero pins the page to 0.
pub fn clamp_page(current: u32, delta: i64, total_pages: Option<u64>) -> u32 {
    let target = i64::from(current).saturating_add(delta).max(0);
    let target = u64::try_from(target).unwrap_or_default();

    let upper = match total_pages {
        Some(total) => total.saturating_sub(1),
        None => u64::from(u32::MAX),
    };

    u32::try_from(target.min(upper)).unwrap_or(u32::MAX)
}

/// Shared handle to the input state.
///
/// Cheap to clone; all clones publish into the same channel.
#[derive(Clone)]
pub struct InputStore {
    sender: Arc<watch::Sender<InputSnapshot>>,
}

impl InputStore {
    pub fn new(initial: InputState) -> Self {
        let (sender, _) = watch::channel(InputSnapshot {
            state: initial,
            change: InputChange::Initial,
            revision: 0,
        });
        Self {
            sender: Arc::new(sender),
        }
    }

    /// A receiver that already holds the current snapshot.
    pub fn subscribe(&self) -> watch::Receiver<InputSnapshot> {
        self.sender.subscribe()
    }

    pub fn current(&self) -> InputState {
        self.sender.borrow().state.clone()
    }

    pub fn snapshot(&self) -> InputSnapshot {
        self.sender.borrow().clone()
    }

    /// Apply a command. Returns `true` if the state changed and was published.
    pub fn update(&self, command: InputCommand) -> bool {
        self.sender.send_if_modified(|snapshot| {
            let next = command.apply(&snapshot.state);
            if next == snapshot.state {
                trace!("Input command {command:?} left state unchanged");
                return false;
            }

            debug!(
                "Input {:?}: search={:?} page={} limit={}",
                command.change(),
                next.search_term,
                next.page,
                next.limit
            );

            snapshot.state = next;
            snapshot.change = command.change();
            snapshot.revision += 1;
            true
        })
    }

    pub fn do_search(&self, term: impl Into<String>) -> bool {
        self.update(InputCommand::Search(term.into()))
    }

    pub fn move_page_by(&self, delta: i64, total_pages: Option<u64>) -> bool {
        self.update(InputCommand::MovePageBy { delta, total_pages })
    }

    pub fn set_limit(&self, limit: PageLimit) -> bool {
        self.update(InputCommand::SetLimit(limit))
    }
}

impl Default for InputStore {
    fn default() -> Self {
        Self::new(InputState::default())
    }
}
