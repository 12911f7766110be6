//! The three user-controlled inputs of a search.

use crate::ModelError;

use common::ErrorLocation;

use std::fmt::{Display, Formatter, Result as FormatResult};

use serde::{Deserialize, Serialize};

/// Page size offered by the limit selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum PageLimit {
    #[default]
    Low,
    Mid,
    High,
}

impl PageLimit {
    /// Every selectable limit, smallest first.
    pub const ALL: [PageLimit; 3] = [PageLimit::Low, PageLimit::Mid, PageLimit::High];

    pub const fn value(self) -> u32 {
        match self {
            PageLimit::Low => 10,
            PageLimit::Mid => 25,
            PageLimit::High => 100,
        }
    }
}

impl TryFrom<u32> for PageLimit {
    type Error = ModelError;

    #[track_caller]
    fn try_from(value: u32) -> Result<Self, Self::Error> {
        PageLimit::ALL
            .into_iter()
            .find(|limit| limit.value() == value)
            .ok_or_else(|| ModelError::UnsupportedLimit {
                value,
                location: ErrorLocation::caller(),
            })
    }
}

impl From<PageLimit> for u32 {
    fn from(limit: PageLimit) -> Self {
        limit.value()
    }
}

impl Display for PageLimit {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FormatResult {
        write!(formatter, "{}", self.value())
    }
}

/// Current search term, zero-based page index and page size.
///
/// Values are immutable snapshots; the input store in `hero-core` replaces
/// the whole value on every mutation and publishes it to subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct InputState {
    pub search_term: String,
    pub page: u32,
    pub limit: PageLimit,
}

impl InputState {
    pub fn new(limit: PageLimit) -> Self {
        Self {
            search_term: String::new(),
            page: 0,
            limit,
        }
    }

    /// One-based page number shown to the user.
    pub fn display_page(&self) -> u32 {
        self.page.saturating_add(1)
    }

    /// `page * limit`, widened so large page indexes cannot overflow.
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.limit.value())
    }
}
