//! Lookup handlers: the source of suggestions.
//!
//! A [`LookupHandler`] receives the query text and a [`Responder`]. It may
//! answer right away, later from another thread, several times, or never.
//! Answers are queued and applied by the controller on its own thread; only
//! the answer to the newest lookup for an input is ever shown.
//!
//! Closures are handlers:
//!
//! ```
//! use autocomplete::Responder;
//!
//! let handler = |query: &str, responder: Responder| {
//!     let fruit = ["Apple", "Apricot", "Banana"];
//!     responder.items(fruit.iter().filter(|f| f.to_lowercase().starts_with(query)).copied());
//! };
//! # let _: &dyn autocomplete::LookupHandler = &handler;
//! ```

use std::fmt;
use std::sync::Arc;

use autocomplete_core::logging::targets;
use crossbeam_channel::Sender;

use crate::input::InputId;
use crate::item::Item;
use crate::query::QueryToken;

/// A lookup answer.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// Suggestions to show. An empty list means "no results".
    Items(Vec<Item>),
    /// Explicitly nothing to show.
    NoResults,
}

impl<I: Into<Item>> From<Vec<I>> for Response {
    fn from(items: Vec<I>) -> Self {
        Self::Items(items.into_iter().map(Into::into).collect())
    }
}

impl<I: Into<Item>> From<Option<Vec<I>>> for Response {
    fn from(items: Option<Vec<I>>) -> Self {
        items.map_or(Self::NoResults, Self::from)
    }
}

/// An answer travelling from a responder to the controller.
#[derive(Debug)]
pub(crate) struct Delivery {
    pub input: InputId,
    pub token: QueryToken,
    pub response: Response,
}

/// The continuation handed to a lookup handler.
///
/// Cheap to clone and safe to move to other threads.
#[derive(Clone)]
pub struct Responder {
    input: InputId,
    token: QueryToken,
    sender: Sender<Delivery>,
}

impl Responder {
    pub(crate) fn new(input: InputId, token: QueryToken, sender: Sender<Delivery>) -> Self {
        Self {
            input,
            token,
            sender,
        }
    }

    /// The token of the lookup this responder answers.
    pub fn token(&self) -> QueryToken {
        self.token
    }

    /// Deliver an answer.
    ///
    /// Returns `false` if the controller no longer exists.
    pub fn respond(&self, response: impl Into<Response>) -> bool {
        let delivery = Delivery {
            input: self.input,
            token: self.token,
            response: response.into(),
        };
        match self.sender.send(delivery) {
            Ok(()) => true,
            Err(_) => {
                tracing::debug!(target: targets::QUERY, token = ?self.token, "controller gone, dropping response");
                false
            }
        }
    }

    /// Deliver a list of suggestions.
    pub fn items<I, T>(&self, items: I) -> bool
    where
        I: IntoIterator<Item = T>,
        T: Into<Item>,
    {
        self.respond(Response::Items(items.into_iter().map(Into::into).collect()))
    }

    /// Deliver "no results".
    pub fn no_results(&self) -> bool {
        self.respond(Response::NoResults)
    }
}

impl fmt::Debug for Responder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Responder")
            .field("input", &self.input)
            .field("token", &self.token)
            .finish()
    }
}

/// A source of suggestions.
pub trait LookupHandler: Send + Sync {
    /// Start a lookup for `query`, answering through `responder`.
    fn lookup(&self, query: &str, responder: Responder);
}

impl<F> LookupHandler for F
where
    F: Fn(&str, Responder) + Send + Sync,
{
    fn lookup(&self, query: &str, responder: Responder) {
        self(query, responder)
    }
}

/// A shared lookup handler.
pub type SharedLookup = Arc<dyn LookupHandler>;

/// Controls how [`StaticLookup`] compares letter case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseSensitivity {
    /// Case-sensitive matching (e.g., "App" won't match "apple").
    CaseSensitive,
    /// Case-insensitive matching (e.g., "App" will match "apple").
    #[default]
    CaseInsensitive,
}

/// Where in a label [`StaticLookup`] looks for the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// The label must start with the query.
    #[default]
    Prefix,
    /// The query may appear anywhere in the label.
    Contains,
}

/// A lookup handler backed by a fixed list, answering synchronously.
///
/// Header rows are kept only when at least one item after them (up to the
/// next header) matches.
#[derive(Debug, Clone, Default)]
pub struct StaticLookup {
    items: Vec<Item>,
    case_sensitivity: CaseSensitivity,
    match_mode: MatchMode,
}

impl StaticLookup {
    /// Create a lookup over `items`.
    pub fn new<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Item>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            case_sensitivity: CaseSensitivity::default(),
            match_mode: MatchMode::default(),
        }
    }

    /// Set case sensitivity using builder pattern.
    pub fn with_case_sensitivity(mut self, sensitivity: CaseSensitivity) -> Self {
        self.case_sensitivity = sensitivity;
        self
    }

    /// Set the match mode using builder pattern.
    pub fn with_match_mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = mode;
        self
    }

    /// Get a reference to the items.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    fn matches(&self, label: &str, query: &str) -> bool {
        let (label, query) = match self.case_sensitivity {
            CaseSensitivity::CaseSensitive => (label.to_owned(), query.to_owned()),
            CaseSensitivity::CaseInsensitive => (label.to_lowercase(), query.to_lowercase()),
        };
        match self.match_mode {
            MatchMode::Prefix => label.starts_with(&query),
            MatchMode::Contains => label.contains(&query),
        }
    }

    /// The items matching `query`, in list order.
    pub fn completions(&self, query: &str) -> Vec<Item> {
        let mut result = Vec::new();
        let mut pending_header: Option<&Item> = None;
        for item in &self.items {
            if item.is_header() {
                pending_header = Some(item);
                continue;
            }
            if self.matches(&item.label(), query) {
                if let Some(header) = pending_header.take() {
                    result.push(header.clone());
                }
                result.push(item.clone());
            }
        }
        result
    }
}

impl LookupHandler for StaticLookup {
    fn lookup(&self, query: &str, responder: Responder) {
        responder.items(self.completions(query));
    }
}

#[cfg(feature = "tokio")]
pub use self::async_lookup::AsyncLookup;

#[cfg(feature = "tokio")]
mod async_lookup {
    use std::fmt;
    use std::future::Future;

    use tokio::runtime::Handle;

    use super::{LookupHandler, Responder, Response};

    /// Adapts an async function into a lookup handler.
    ///
    /// Each lookup spawns the future on the given runtime and delivers its
    /// output through the responder.
    pub struct AsyncLookup<F> {
        handle: Handle,
        fetch: F,
    }

    impl<F, Fut> AsyncLookup<F>
    where
        F: Fn(String) -> Fut + Send + Sync,
        Fut: Future<Output = Response> + Send + 'static,
    {
        /// Spawn lookups on `handle`.
        pub fn new(handle: Handle, fetch: F) -> Self {
            Self { handle, fetch }
        }

        /// Spawn lookups on the runtime of the calling context.
        ///
        /// # Panics
        ///
        /// Panics if called outside a tokio runtime.
        pub fn current(fetch: F) -> Self {
            Self::new(Handle::current(), fetch)
        }
    }

    impl<F, Fut> LookupHandler for AsyncLookup<F>
    where
        F: Fn(String) -> Fut + Send + Sync,
        Fut: Future<Output = Response> + Send + 'static,
    {
        fn lookup(&self, query: &str, responder: Responder) {
            let future = (self.fetch)(query.to_owned());
            self.handle.spawn(async move {
                responder.respond(future.await);
            });
        }
    }

    impl<F> fmt::Debug for AsyncLookup<F> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_struct("AsyncLookup").finish_non_exhaustive()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Entry;

    #[test]
    fn test_static_lookup_prefix_case_insensitive() {
        let lookup = StaticLookup::new(["Apple", "application", "Banana", "cherry"]);
        let labels: Vec<_> = lookup
            .completions("app")
            .iter()
            .map(|i| i.label().into_owned())
            .collect();
        assert_eq!(labels, vec!["Apple", "application"]);
    }

    #[test]
    fn test_static_lookup_case_sensitive() {
        let lookup = StaticLookup::new(["Apple", "apple"])
            .with_case_sensitivity(CaseSensitivity::CaseSensitive);
        assert_eq!(lookup.completions("App"), vec![Item::from("Apple")]);
    }

    #[test]
    fn test_static_lookup_contains_keeps_headers() {
        let lookup = StaticLookup::new(vec![
            Item::header("Fruit"),
            Item::from("Pineapple"),
            Item::from("Banana"),
            Item::header("Tools"),
            Item::from(Entry::new("Hammer")),
        ])
        .with_match_mode(MatchMode::Contains);

        assert_eq!(
            lookup.completions("apple"),
            vec![Item::header("Fruit"), Item::from("Pineapple")]
        );
        assert_eq!(
            lookup.completions("mm"),
            vec![Item::header("Tools"), Item::from(Entry::new("Hammer"))]
        );
    }

    #[test]
    fn test_response_conversions() {
        assert_eq!(Response::from(None::<Vec<Item>>), Response::NoResults);
        assert_eq!(
            Response::from(Some(vec!["a"])),
            Response::Items(vec![Item::from("a")])
        );
    }

    #[test]
    fn test_responder_reports_closed_channel() {
        let (sender, receiver) = crossbeam_channel::unbounded();
        let token = crate::query::QueryCoordinator::new().begin("late");
        let responder = Responder::new(InputId::default(), token, sender);
        assert!(responder.no_results());
        drop(receiver);
        assert!(!responder.items(["late"]));
    }
}
