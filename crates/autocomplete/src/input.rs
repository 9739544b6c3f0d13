//! Host-side collaborators: the text field, link navigation and the
//! selection notification.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use autocomplete_core::Rect;
use autocomplete_core::logging::targets;
use parking_lot::Mutex;
use slotmap::new_key_type;

use crate::error::{Error, Result};
use crate::item::Item;

new_key_type! {
    /// Identifies an input attached to an [`Autocomplete`](crate::Autocomplete).
    pub struct InputId;
}

/// A single-line text field the controller can read and fill.
pub trait TextInput: Send {
    /// The field's current text.
    fn text(&self) -> String;

    /// Replace the field's text.
    fn set_text(&mut self, text: &str);

    /// The field's bounding box in viewport coordinates.
    fn bounds(&self) -> Rect;

    /// Enable or disable the host's own autocomplete for this field.
    fn set_native_autocomplete(&mut self, _enabled: bool) {}
}

/// A shared handle to an attached text field.
pub type SharedInput = Arc<Mutex<dyn TextInput>>;

/// A plain in-memory text field.
///
/// Useful for hosts that keep their own widget state and mirror it into the
/// controller, and for tests.
#[derive(Debug, Clone, PartialEq)]
pub struct LineInput {
    text: String,
    bounds: Rect,
    native_autocomplete: bool,
}

impl LineInput {
    /// Create an empty field occupying `bounds`.
    pub fn new(bounds: Rect) -> Self {
        Self {
            text: String::new(),
            bounds,
            native_autocomplete: true,
        }
    }

    /// Set the initial text using builder pattern.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Move or resize the field.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    /// Whether the host's own autocomplete is enabled.
    pub fn native_autocomplete(&self) -> bool {
        self.native_autocomplete
    }

    /// Wrap the field in a shared handle.
    pub fn shared(self) -> Arc<Mutex<Self>> {
        Arc::new(Mutex::new(self))
    }
}

impl TextInput for LineInput {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_native_autocomplete(&mut self, enabled: bool) {
        self.native_autocomplete = enabled;
    }
}

/// Opens the target of link items.
pub trait Navigator: Send + Sync {
    /// Navigate to `href`.
    fn navigate(&self, href: &str) -> Result<()>;
}

/// Opens links with the platform's default handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemNavigator;

impl Navigator for SystemNavigator {
    fn navigate(&self, href: &str) -> Result<()> {
        tracing::debug!(target: targets::CONTROLLER, href, "opening link");
        open::that(href).map_err(|source| Error::navigation(href, source))
    }
}

/// Name of the selection notification.
pub const SELECT_EVENT: &str = "ac-select";

/// Notification emitted when an item is committed.
///
/// Mirrors a bubbling, cancelable DOM custom event. Listeners may call
/// [`prevent_default`](Self::prevent_default); the controller reports the
/// flag back to the caller of the commit but still fills the input.
#[derive(Clone)]
pub struct SelectEvent {
    input: InputId,
    item: Item,
    default_prevented: Arc<AtomicBool>,
}

impl SelectEvent {
    pub(crate) fn new(input: InputId, item: Item) -> Self {
        Self {
            input,
            item,
            default_prevented: Arc::new(AtomicBool::new(false)),
        }
    }

    /// The event name, `ac-select`.
    pub fn name(&self) -> &'static str {
        SELECT_EVENT
    }

    /// The input the item was committed into.
    pub fn input(&self) -> InputId {
        self.input
    }

    /// The committed item.
    pub fn item(&self) -> &Item {
        &self.item
    }

    /// Always `true`.
    pub fn bubbles(&self) -> bool {
        true
    }

    /// Always `true`.
    pub fn cancelable(&self) -> bool {
        true
    }

    /// Flag the event as handled by a listener.
    pub fn prevent_default(&self) {
        self.default_prevented.store(true, Ordering::SeqCst);
    }

    /// Whether any listener called [`prevent_default`](Self::prevent_default).
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented.load(Ordering::SeqCst)
    }
}

impl fmt::Debug for SelectEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectEvent")
            .field("name", &SELECT_EVENT)
            .field("input", &self.input)
            .field("item", &self.item)
            .field("default_prevented", &self.is_default_prevented())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_input_text() {
        let mut input = LineInput::new(Rect::new(0.0, 0.0, 120.0, 24.0)).with_text("abc");
        assert_eq!(input.text(), "abc");
        input.set_text("xyz");
        assert_eq!(input.text(), "xyz");
        input.set_native_autocomplete(false);
        assert!(!input.native_autocomplete());
    }

    #[test]
    fn test_select_event_prevent_default_is_shared() {
        let event = SelectEvent::new(InputId::default(), Item::text("a"));
        let copy = event.clone();
        assert!(!event.is_default_prevented());
        copy.prevent_default();
        assert!(event.is_default_prevented());
        assert_eq!(event.name(), "ac-select");
    }
}
