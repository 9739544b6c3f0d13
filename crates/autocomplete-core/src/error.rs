//! Error types for the autocomplete core.

/// A specialized Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// The main error type for core operations.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Timer-related error.
    #[error("Timer error: {0}")]
    Timer(#[from] TimerError),

    /// Signal-related error.
    #[error("Signal error: {0}")]
    Signal(#[from] SignalError),
}

/// Timer-specific errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimerError {
    /// The timer ID is invalid or has already been removed.
    #[error("Invalid or expired timer ID")]
    InvalidTimerId,
}

/// Signal-specific errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignalError {
    /// The connection ID is invalid or has already been disconnected.
    #[error("Invalid or disconnected connection ID")]
    InvalidConnection,
}
