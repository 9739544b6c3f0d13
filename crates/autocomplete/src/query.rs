//! Query coordination.
//!
//! Each attached input owns a [`QueryCoordinator`]. Every dispatched lookup
//! gets a fresh [`QueryToken`]; a response is only ever installed if it
//! carries the most recently minted token. Lookups cannot be cancelled, so a
//! superseded lookup is simply ignored when it answers.

use crate::item::Item;
use crate::lookup::Response;

/// Identifies one dispatched lookup for one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QueryToken(u64);

impl QueryToken {
    /// Get the raw u64 value of this token.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// What to do with a lookup response.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// A newer lookup was dispatched since this one.
    Stale,
    /// The lookup answered with nothing to show.
    Empty,
    /// Install these items, already truncated to the limit.
    Install(Vec<Item>),
}

/// Mints tokens and judges responses for one input.
#[derive(Debug, Default)]
pub struct QueryCoordinator {
    next: u64,
    latest: Option<(QueryToken, String)>,
}

impl QueryCoordinator {
    /// Create a coordinator that has not dispatched anything yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint the token for a new lookup of `query`, superseding all earlier
    /// tokens.
    pub fn begin(&mut self, query: impl Into<String>) -> QueryToken {
        self.next += 1;
        let token = QueryToken(self.next);
        self.latest = Some((token, query.into()));
        token
    }

    /// The most recently minted token.
    pub fn latest(&self) -> Option<QueryToken> {
        self.latest.as_ref().map(|(token, _)| *token)
    }

    /// The query text of the most recent lookup.
    pub fn latest_query(&self) -> Option<&str> {
        self.latest.as_ref().map(|(_, query)| query.as_str())
    }

    /// Whether `token` belongs to the most recent lookup.
    pub fn is_current(&self, token: QueryToken) -> bool {
        self.latest() == Some(token)
    }

    /// Judge a response to the lookup identified by `token`.
    pub fn resolve(&self, token: QueryToken, response: Response, limit: usize) -> Resolution {
        if !self.is_current(token) {
            return Resolution::Stale;
        }
        match response {
            Response::NoResults => Resolution::Empty,
            Response::Items(items) if items.is_empty() => Resolution::Empty,
            Response::Items(mut items) => {
                items.truncate(limit);
                Resolution::Install(items)
            }
        }
    }
}
