//! Logging facilities.
//!
//! The autocomplete crates use the `tracing` crate for instrumentation and
//! never install a subscriber themselves. To see logs, install one in your
//! application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("autocomplete=debug,autocomplete_core=trace")
//!     .init();
//! ```
//!
//! Every event is emitted with an explicit target from [`targets`], so
//! subsystems can be filtered independently.

/// Target names for log filtering.
pub mod targets {
    /// Timer system target.
    pub const TIMER: &str = "autocomplete_core::timer";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "autocomplete_core::signal";
    /// Controller target.
    pub const CONTROLLER: &str = "autocomplete::controller";
    /// Query coordinator target.
    pub const QUERY: &str = "autocomplete::query";
    /// Selection state machine target.
    pub const SELECTION: &str = "autocomplete::selection";
    /// Presentation surface target.
    pub const SURFACE: &str = "autocomplete::surface";
    /// Performance span target.
    pub const PERF: &str = "autocomplete::perf";
}

/// A guard that records how long an operation took.
///
/// The span is entered on creation and exited on drop.
///
/// ```
/// use autocomplete_core::PerfSpan;
///
/// {
///     let _span = PerfSpan::new("render_rows");
///     // ... work ...
/// }
/// ```
pub struct PerfSpan {
    _span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create and enter a performance span for `name`.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::debug_span!(target: targets::PERF, "perf", operation = name);
        Self {
            _span: span.entered(),
        }
    }
}

impl std::fmt::Debug for PerfSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PerfSpan").finish_non_exhaustive()
    }
}
