//! Core systems for the autocomplete controller.
//!
//! This crate provides the host-independent building blocks the controller is
//! assembled from:
//!
//! - **Signal/Slot System**: Type-safe notification of listeners
//! - **Timers**: One-shot timer queue driven by an injectable clock
//! - **Debouncer**: Collapses bursts of calls into one trailing call
//! - **Clock**: Wall-clock and manually advanced time sources
//! - **Input Events**: Keyboard, focus and text-input event vocabulary
//! - **Geometry**: Points, sizes and rectangles for dropdown placement
//!
//! # Signal/Slot Example
//!
//! ```
//! use autocomplete_core::Signal;
//!
//! let committed = Signal::<String>::new();
//!
//! let conn_id = committed.connect(|value| {
//!     println!("Committed: {}", value);
//! });
//!
//! committed.emit("Apple".to_string());
//! committed.disconnect(conn_id);
//! ```
//!
//! # Debounce Example
//!
//! ```
//! use std::time::Duration;
//! use autocomplete_core::{Clock, Debouncer, ManualClock};
//!
//! let clock = ManualClock::new();
//! let mut fired = Vec::new();
//! let mut debounced = Debouncer::new(Duration::from_millis(250));
//!
//! debounced.call("a", clock.now());
//! clock.advance(Duration::from_millis(100));
//! debounced.call("ap", clock.now());
//! clock.advance(Duration::from_millis(250));
//!
//! if let Some(text) = debounced.poll(clock.now()) {
//!     fired.push(text);
//! }
//! assert_eq!(fired, vec!["ap"]);
//! ```

mod clock;
pub mod debounce;
mod error;
pub mod event;
pub mod geometry;
pub mod logging;
pub mod signal;
pub mod timer;

pub use clock::{Clock, ManualClock, SharedClock, SystemClock};
pub use debounce::{Debounced, Debouncer};
pub use error::{CoreError, Result, SignalError, TimerError};
pub use event::{FocusTarget, InputKind, Key, KeyEvent, Modifiers, MouseButton};
pub use geometry::{Point, Rect, Size};
pub use logging::PerfSpan;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
pub use timer::{TimerId, TimerManager};
