//! Error types for the autocomplete controller.

use crate::input::InputId;

/// Result type alias for controller operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while attaching or driving the controller.
///
/// Empty results, stale responses and too-short input are not errors; they
/// simply close the dropdown.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An input was attached without a lookup handler.
    #[error("Autocomplete needs a handler to return items based on a query")]
    MissingHandler,

    /// The input id does not belong to this controller (or was detached).
    #[error("No input with id {0:?} is attached")]
    UnknownInput(InputId),

    /// Configuration could not be parsed as JSON.
    #[error("Invalid JSON configuration: {0}")]
    ConfigJson(#[from] serde_json::Error),

    /// Configuration could not be parsed as TOML.
    #[error("Invalid TOML configuration: {0}")]
    ConfigToml(#[from] toml::de::Error),

    /// Configuration overrides were not an object.
    #[error("Configuration overrides must be a key/value object")]
    ConfigShape,

    /// A link item could not be opened.
    #[error("Failed to navigate to '{href}': {source}")]
    Navigation {
        href: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a navigation error.
    pub fn navigation(href: impl Into<String>, source: std::io::Error) -> Self {
        Self::Navigation {
            href: href.into(),
            source,
        }
    }
}
