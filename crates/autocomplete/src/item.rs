//! Suggestion items.
//!
//! An [`Item`] is what a lookup handler returns for a query. Items accept the
//! same JSON shapes web lookup endpoints commonly produce:
//!
//! ```json
//! ["Apple", 42, {"_header": "Fruit"}, {"text": "Banana", "sub": "yellow", "value": "B"}]
//! ```

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// A structured suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Display label.
    pub text: String,
    /// Secondary label shown under or beside the main one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Value written into the input on commit. Defaults to `text`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Navigation target opened on commit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Disabled entries are shown but cannot be committed.
    #[serde(
        default,
        rename = "_disabled",
        alias = "disabled",
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub disabled: bool,
}

impl Entry {
    /// Create an entry with only a label.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sub: None,
            value: None,
            href: None,
            disabled: false,
        }
    }

    /// Set the secondary label using builder pattern.
    pub fn with_sub(mut self, sub: impl Into<String>) -> Self {
        self.sub = Some(sub.into());
        self
    }

    /// Set the commit value using builder pattern.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the navigation target using builder pattern.
    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    /// Mark the entry disabled using builder pattern.
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

/// One suggestion row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Item {
    /// A bare string, used as both label and value.
    Text(String),
    /// A bare number, used as both label and value.
    Number(serde_json::Number),
    /// A non-selectable separator or group header.
    Header {
        #[serde(rename = "_header")]
        label: String,
    },
    /// A structured suggestion.
    Entry(Entry),
}

impl Item {
    /// A plain text item.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// A header row.
    pub fn header(label: impl Into<String>) -> Self {
        Self::Header {
            label: label.into(),
        }
    }

    /// The main display label.
    pub fn label(&self) -> Cow<'_, str> {
        match self {
            Self::Text(text) => Cow::Borrowed(text),
            Self::Number(number) => Cow::Owned(number.to_string()),
            Self::Header { label } => Cow::Borrowed(label),
            Self::Entry(entry) => Cow::Borrowed(&entry.text),
        }
    }

    /// The secondary label, if any.
    pub fn sub(&self) -> Option<&str> {
        match self {
            Self::Entry(entry) => entry.sub.as_deref(),
            _ => None,
        }
    }

    /// The text written into the input when this item is committed.
    ///
    /// `value` wins over `text`; plain strings and numbers commit themselves.
    /// Headers have nothing to commit.
    pub fn commit_value(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Header { .. } => None,
            Self::Entry(entry) => Some(Cow::Borrowed(
                entry.value.as_deref().unwrap_or(&entry.text),
            )),
            other => Some(other.label()),
        }
    }

    /// The navigation target, if any.
    pub fn href(&self) -> Option<&str> {
        match self {
            Self::Entry(entry) => entry.href.as_deref(),
            _ => None,
        }
    }

    /// Whether this is a header row.
    pub fn is_header(&self) -> bool {
        matches!(self, Self::Header { .. })
    }

    /// Whether this is a disabled entry.
    pub fn is_disabled(&self) -> bool {
        matches!(self, Self::Entry(entry) if entry.disabled)
    }

    /// Whether committing this item does anything.
    pub fn is_selectable(&self) -> bool {
        !self.is_header() && !self.is_disabled()
    }
}

impl From<&str> for Item {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for Item {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<i64> for Item {
    fn from(number: i64) -> Self {
        Self::Number(number.into())
    }
}

impl From<u64> for Item {
    fn from(number: u64) -> Self {
        Self::Number(number.into())
    }
}

impl From<Entry> for Item {
    fn from(entry: Entry) -> Self {
        Self::Entry(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_value_precedence() {
        let with_value = Item::from(Entry::new("Foo").with_value("F"));
        assert_eq!(with_value.commit_value().as_deref(), Some("F"));

        let text_only = Item::from(Entry::new("Foo"));
        assert_eq!(text_only.commit_value().as_deref(), Some("Foo"));

        assert_eq!(Item::text("raw").commit_value().as_deref(), Some("raw"));
        assert_eq!(Item::from(42i64).commit_value().as_deref(), Some("42"));
        assert_eq!(Item::header("Fruit").commit_value(), None);
    }

    #[test]
    fn test_deserialize_mixed_shapes() {
        let items: Vec<Item> = serde_json::from_str(
            r#"["Apple", 7, {"_header": "Fruit"},
                {"text": "Banana", "sub": "yellow", "value": "B", "href": "/b"},
                {"text": "Cherry", "_disabled": true},
                {"text": "Date", "disabled": true, "extra": 1}]"#,
        )
        .unwrap();

        assert_eq!(items[0], Item::text("Apple"));
        assert_eq!(items[1], Item::from(7i64));
        assert_eq!(items[2], Item::header("Fruit"));
        assert_eq!(
            items[3],
            Item::from(
                Entry::new("Banana")
                    .with_sub("yellow")
                    .with_value("B")
                    .with_href("/b")
            )
        );
        assert!(items[4].is_disabled());
        assert!(items[5].is_disabled());
        assert!(!items[5].is_selectable());
    }

    #[test]
    fn test_serialize_round_shape() {
        let json = serde_json::to_value(Item::header("Group")).unwrap();
        assert_eq!(json, serde_json::json!({"_header": "Group"}));

        let json = serde_json::to_value(Item::from(Entry::new("X").disabled())).unwrap();
        assert_eq!(json, serde_json::json!({"text": "X", "_disabled": true}));
    }

    #[test]
    fn test_selectable() {
        assert!(Item::text("a").is_selectable());
        assert!(!Item::header("h").is_selectable());
        assert!(Item::from(Entry::new("e")).is_selectable());
        assert!(!Item::from(Entry::new("e").disabled()).is_selectable());
    }
}
