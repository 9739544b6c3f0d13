//! Widget configuration.
//!
//! Options can be built in code or loaded from JSON/TOML. Missing keys keep
//! their defaults and unknown keys are ignored, so a partial document acts as
//! a shallow override of the defaults.
//!
//! ```
//! use std::time::Duration;
//! use autocomplete::Config;
//!
//! let config = Config::from_json_str(r#"{"delay": 100, "minInputLength": 2, "theme": "dark"}"#)?;
//! assert_eq!(config.delay, Duration::from_millis(100));
//! assert_eq!(config.min_input_length, 2);
//! assert_eq!(config.limit, 20);
//! # Ok::<(), autocomplete::Error>(())
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default debounce window.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(250);
/// Default maximum number of rendered items.
pub const DEFAULT_LIMIT: usize = 20;
/// Default number of characters needed before a lookup runs.
pub const DEFAULT_MIN_INPUT_LENGTH: usize = 3;
/// Default loading placeholder text.
pub const DEFAULT_LOADING_STRING: &str = "Loading...";

/// Options for an [`Autocomplete`](crate::Autocomplete) controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Quiet period after typing before a lookup runs.
    #[serde(with = "duration_millis")]
    pub delay: Duration,
    /// Maximum number of items rendered from one response. Never below 1.
    pub limit: usize,
    /// Minimum input length, in grapheme clusters, before a lookup runs.
    #[serde(alias = "min_input_length")]
    pub min_input_length: usize,
    /// Text of the placeholder row shown while a lookup is in flight.
    #[serde(alias = "loading_string")]
    pub loading_string: String,
    /// Anchor the dropdown to the input's right edge.
    pub rtl: bool,
    /// Mark query matches inside rendered labels.
    pub highlight: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delay: DEFAULT_DELAY,
            limit: DEFAULT_LIMIT,
            min_input_length: DEFAULT_MIN_INPUT_LENGTH,
            loading_string: DEFAULT_LOADING_STRING.to_owned(),
            rtl: false,
            highlight: true,
        }
    }
}

impl Config {
    /// Parse options from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.normalized())
    }

    /// Parse options from a TOML document.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml)?;
        Ok(config.normalized())
    }

    /// Apply a JSON object of overrides on top of these options.
    ///
    /// Keys present in `overrides` replace the current value; everything else
    /// is kept. Unknown keys are ignored.
    pub fn merged(&self, overrides: &serde_json::Value) -> Result<Self> {
        let serde_json::Value::Object(overrides) = overrides else {
            return Err(Error::ConfigShape);
        };
        let mut base = serde_json::to_value(self)?;
        if let serde_json::Value::Object(fields) = &mut base {
            for (key, value) in overrides {
                fields.insert(camel_case(key), value.clone());
            }
        }
        let config: Self = serde_json::from_value(base)?;
        Ok(config.normalized())
    }

    pub(crate) fn normalized(mut self) -> Self {
        self.limit = self.limit.max(1);
        self
    }

    /// Set the debounce window using builder pattern.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Set the item limit using builder pattern.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.max(1);
        self
    }

    /// Set the minimum input length using builder pattern.
    pub fn with_min_input_length(mut self, length: usize) -> Self {
        self.min_input_length = length;
        self
    }

    /// Set the loading placeholder using builder pattern.
    pub fn with_loading_string(mut self, text: impl Into<String>) -> Self {
        self.loading_string = text.into();
        self
    }

    /// Set right-to-left anchoring using builder pattern.
    pub fn with_rtl(mut self, rtl: bool) -> Self {
        self.rtl = rtl;
        self
    }

    /// Enable or disable match highlighting using builder pattern.
    pub fn with_highlight(mut self, highlight: bool) -> Self {
        self.highlight = highlight;
        self
    }
}

/// `min_input_length` -> `minInputLength`, so overrides may use either form.
fn camel_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper = false;
    for c in key.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

mod duration_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(
        delay: &Duration,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(delay.as_millis()).unwrap_or(u64::MAX))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
