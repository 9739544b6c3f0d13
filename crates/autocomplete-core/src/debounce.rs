//! Trailing-edge debouncing.
//!
//! A burst of calls separated by less than the configured delay collapses
//! into a single trailing call carrying the arguments of the last call in the
//! burst. Nothing happens until the quiet period elapses uninterrupted.
//!
//! Two flavors are provided:
//!
//! - [`Debouncer<A>`] only tracks timing and hands the surviving arguments
//!   back from [`poll`](Debouncer::poll). Use it when the caller wants to run
//!   the trailing action itself (the controller does this, because the action
//!   needs `&mut` access to state the debouncer cannot borrow).
//! - [`Debounced<L, A>`] owns the target function and fixed leading
//!   arguments, and invokes the function on its own when polled.
//!
//! Neither reads the wall clock; callers pass the current instant.
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use autocomplete_core::Debounced;
//!
//! let start = Instant::now();
//! let mut log = Vec::new();
//! {
//!     let mut search = Debounced::with_leading(
//!         "field-1",
//!         |field: &&str, text: String| log.push(format!("{field}:{text}")),
//!         Duration::from_millis(250),
//!     );
//!     search.call("app".to_string(), start);
//!     search.call("appl".to_string(), start + Duration::from_millis(100));
//!     assert!(!search.poll(start + Duration::from_millis(300)));
//!     assert!(search.poll(start + Duration::from_millis(350)));
//! }
//! assert_eq!(log, vec!["field-1:appl".to_string()]);
//! ```

use std::fmt;
use std::time::{Duration, Instant};

use crate::timer::{TimerId, TimerManager};

/// Timing half of a debounced call: stores the latest arguments and the
/// one-shot timer guarding them.
pub struct Debouncer<A> {
    delay: Duration,
    timers: TimerManager,
    pending: Option<(TimerId, A)>,
}

impl<A> Debouncer<A> {
    /// Create a debouncer with the given quiet period.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            timers: TimerManager::new(),
            pending: None,
        }
    }

    /// The configured quiet period.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Register a call at `now`.
    ///
    /// Any pending call is cancelled and its arguments dropped; the quiet
    /// period restarts from `now`.
    pub fn call(&mut self, args: A, now: Instant) {
        if let Some((timer, _)) = self.pending.take() {
            // The timer may already be due but unpolled; either way it is
            // superseded.
            let _ = self.timers.stop(timer);
        }
        let timer = self.timers.start_one_shot(self.delay, now);
        self.pending = Some((timer, args));
    }

    /// Return the pending arguments if the quiet period has elapsed at `now`.
    ///
    /// Returns each burst's arguments at most once. A call made after that
    /// starts a fresh cycle.
    pub fn poll(&mut self, now: Instant) -> Option<A> {
        let (timer, _) = self.pending.as_ref()?;
        let timer = *timer;
        if self.timers.process_expired(now).contains(&timer) {
            self.pending.take().map(|(_, args)| args)
        } else {
            None
        }
    }

    /// Take the pending arguments immediately, regardless of the deadline.
    pub fn flush(&mut self) -> Option<A> {
        let (timer, args) = self.pending.take()?;
        let _ = self.timers.stop(timer);
        Some(args)
    }

    /// Drop the pending call, if any. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.flush().is_some()
    }

    /// Whether a call is waiting for its quiet period.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The instant the pending call becomes due.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending
            .as_ref()
            .and_then(|(timer, _)| self.timers.deadline(*timer))
    }
}

impl<A> fmt::Debug for Debouncer<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay", &self.delay)
            .field("pending", &self.is_pending())
            .field("deadline", &self.deadline())
            .finish()
    }
}

/// A debounced function with optional fixed leading arguments.
///
/// The target receives the leading arguments by reference and the trailing
/// arguments of the last call in a burst by value.
pub struct Debounced<L, A, F>
where
    F: FnMut(&L, A),
{
    leading: L,
    target: F,
    inner: Debouncer<A>,
}

impl<A, F> Debounced<(), A, F>
where
    F: FnMut(&(), A),
{
    /// Debounce `target` with no leading arguments.
    pub fn new(target: F, delay: Duration) -> Self {
        Self::with_leading((), target, delay)
    }
}

impl<L, A, F> Debounced<L, A, F>
where
    F: FnMut(&L, A),
{
    /// Debounce `target`, always passing `leading` before the call arguments.
    pub fn with_leading(leading: L, target: F, delay: Duration) -> Self {
        Self {
            leading,
            target,
            inner: Debouncer::new(delay),
        }
    }

    /// Register a call at `now`, restarting the quiet period.
    pub fn call(&mut self, args: A, now: Instant) {
        self.inner.call(args, now);
    }

    /// Invoke the target if the quiet period has elapsed at `now`.
    ///
    /// Returns whether the target ran.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.inner.poll(now) {
            Some(args) => {
                (self.target)(&self.leading, args);
                true
            }
            None => false,
        }
    }

    /// Invoke the target now if a call is pending.
    pub fn flush(&mut self) -> bool {
        match self.inner.flush() {
            Some(args) => {
                (self.target)(&self.leading, args);
                true
            }
            None => false,
        }
    }

    /// Drop the pending call without invoking the target.
    pub fn cancel(&mut self) -> bool {
        self.inner.cancel()
    }

    /// Whether a call is waiting for its quiet period.
    pub fn is_pending(&self) -> bool {
        self.inner.is_pending()
    }

    /// The instant the pending call becomes due.
    pub fn deadline(&self) -> Option<Instant> {
        self.inner.deadline()
    }
}

impl<L: fmt::Debug, A, F> fmt::Debug for Debounced<L, A, F>
where
    F: FnMut(&L, A),
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debounced")
            .field("leading", &self.leading)
            .field("inner", &self.inner)
            .finish()
    }
}
