//! The autocomplete controller.
//!
//! [`Autocomplete`] is the only type hosts need to drive. It owns the shared
//! presentation surface, a registry of attached inputs with their independent
//! selection state, query tokens and debouncers, and the inbox through which
//! lookup handlers answer.
//!
//! # Host loop
//!
//! ```
//! use autocomplete::prelude::*;
//!
//! let mut autocomplete = Autocomplete::new(Config::default());
//! let field = LineInput::new(Rect::new(0.0, 0.0, 200.0, 24.0)).shared();
//! let id = autocomplete
//!     .attach_lookup(field.clone(), StaticLookup::new(["Apple", "Apricot", "Banana"]))?
//!     .expect("input supplied");
//!
//! field.lock().set_text("apr");
//! let _ = autocomplete.handle_event(id, WidgetEvent::Focus)?;
//! assert_eq!(autocomplete.surface().map(|s| s.labels()), Some(vec!["Apricot"]));
//!
//! let _ = autocomplete.handle_event(id, WidgetEvent::key_down(Key::ArrowDown))?;
//! let outcome = autocomplete.handle_event(id, WidgetEvent::key_down(Key::Enter))?;
//! assert!(outcome.default_prevented);
//! assert_eq!(field.lock().text(), "Apricot");
//! assert!(!autocomplete.is_open());
//!
//! // Call on every host loop iteration, or when `next_deadline` passes.
//! autocomplete.process_pending();
//! # Ok::<(), autocomplete::Error>(())
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use autocomplete_core::logging::targets;
use autocomplete_core::{
    Clock, Debouncer, FocusTarget, InputKind, Key, KeyEvent, MouseButton, Signal, Size,
    SystemClock,
};
use crossbeam_channel::{Receiver, Sender};
use slotmap::SlotMap;
use unicode_segmentation::UnicodeSegmentation;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::input::{InputId, Navigator, SelectEvent, SharedInput, SystemNavigator};
use crate::item::Item;
use crate::list_surface::ListSurface;
use crate::lookup::{Delivery, LookupHandler, Responder, SharedLookup};
use crate::query::{QueryCoordinator, QueryToken, Resolution};
use crate::selection::{Navigation, Selection, SelectionState};
use crate::surface::PresentationSurface;

/// Default viewport assumed until the host reports one.
pub const DEFAULT_VIEWPORT: Size = Size::new(1280.0, 800.0);

/// An event forwarded from the host for one attached input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WidgetEvent {
    /// The input gained focus.
    Focus,
    /// The input lost focus.
    Blur {
        /// Where focus went.
        related: FocusTarget,
    },
    /// The user clicked outside the input and the dropdown.
    OutsideClick,
    /// The input's text changed.
    Input {
        kind: InputKind,
        /// The key that produced the change, if known.
        key: Option<KeyEvent>,
    },
    /// A key was pressed while the input had focus.
    KeyDown(KeyEvent),
    /// A key was released while the input had focus.
    KeyUp(KeyEvent),
    /// A mouse button went down on a dropdown row.
    RowMouseDown { index: usize, button: MouseButton },
}

impl WidgetEvent {
    /// A key press without modifiers.
    pub fn key_down(key: Key) -> Self {
        Self::KeyDown(KeyEvent::new(key))
    }

    /// Text typed with `key`.
    pub fn typed(key: Key) -> Self {
        Self::Input {
            kind: InputKind::Typing,
            key: Some(KeyEvent::new(key)),
        }
    }

    /// Text pasted from the clipboard.
    pub fn paste() -> Self {
        Self::Input {
            kind: InputKind::Paste,
            key: None,
        }
    }

    /// Focus lost to nothing in particular.
    pub fn blur() -> Self {
        Self::Blur {
            related: FocusTarget::None,
        }
    }

    /// A primary-button press on row `index`.
    pub fn click_row(index: usize) -> Self {
        Self::RowMouseDown {
            index,
            button: MouseButton::Primary,
        }
    }
}

/// What the host should do with the native event after the controller saw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[must_use]
pub struct EventOutcome {
    /// Suppress the native default behavior (caret movement, form submit,
    /// focus change).
    pub default_prevented: bool,
}

impl EventOutcome {
    const IGNORED: Self = Self {
        default_prevented: false,
    };
    const PREVENTED: Self = Self {
        default_prevented: true,
    };
}

type SurfaceFactory<S> = Box<dyn FnOnce() -> S + Send>;

/// Per-input state.
struct InputState {
    input: SharedInput,
    handler: SharedLookup,
    query: QueryCoordinator,
    selection: Selection,
    debounce: Debouncer<Option<KeyEvent>>,
}

/// Builder for an [`Autocomplete`] controller.
pub struct AutocompleteBuilder<S = ListSurface> {
    config: Config,
    clock: Arc<dyn Clock>,
    navigator: Arc<dyn Navigator>,
    surface: SurfaceFactory<S>,
    viewport: Size,
}

impl AutocompleteBuilder<ListSurface> {
    fn new() -> Self {
        Self {
            config: Config::default(),
            clock: Arc::new(SystemClock),
            navigator: Arc::new(SystemNavigator),
            surface: Box::new(ListSurface::new),
            viewport: DEFAULT_VIEWPORT,
        }
    }
}

impl<S: PresentationSurface> AutocompleteBuilder<S> {
    /// Set the configuration.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Set the time source used for debouncing.
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Set how link items are opened.
    pub fn navigator(mut self, navigator: impl Navigator + 'static) -> Self {
        self.navigator = Arc::new(navigator);
        self
    }

    /// Set the initial viewport size.
    pub fn viewport(mut self, viewport: Size) -> Self {
        self.viewport = viewport;
        self
    }

    /// Use a different presentation surface, created on first attachment.
    pub fn surface<T, F>(self, factory: F) -> AutocompleteBuilder<T>
    where
        T: PresentationSurface,
        F: FnOnce() -> T + Send + 'static,
    {
        AutocompleteBuilder {
            config: self.config,
            clock: self.clock,
            navigator: self.navigator,
            surface: Box::new(factory),
            viewport: self.viewport,
        }
    }

    /// Build the controller.
    pub fn build(self) -> Autocomplete<S> {
        let (inbox_tx, inbox) = crossbeam_channel::unbounded();
        Autocomplete {
            config: self.config.normalized(),
            clock: self.clock,
            navigator: self.navigator,
            surface_factory: Some(self.surface),
            surface: None,
            owner: None,
            viewport: self.viewport,
            inputs: SlotMap::with_key(),
            inbox_tx,
            inbox,
            selected: Signal::new(),
        }
    }
}

/// Attaches suggestion dropdowns to text inputs.
///
/// All attached inputs share one presentation surface, so at most one
/// dropdown is visible at a time, anchored to the input that last showed it.
/// Each input keeps its own query tokens and selection state.
///
/// # Signals
///
/// - `selected(SelectEvent)`: Emitted when an item is committed, before the
///   input is filled (the `ac-select` notification).
pub struct Autocomplete<S = ListSurface> {
    config: Config,
    clock: Arc<dyn Clock>,
    navigator: Arc<dyn Navigator>,
    surface_factory: Option<SurfaceFactory<S>>,
    surface: Option<S>,
    /// The input the surface currently shows a dropdown for.
    owner: Option<InputId>,
    viewport: Size,
    inputs: SlotMap<InputId, InputState>,
    inbox_tx: Sender<Delivery>,
    inbox: Receiver<Delivery>,

    /// Signal emitted when an item is committed.
    pub selected: Signal<SelectEvent>,
}

impl Autocomplete<ListSurface> {
    /// Create a controller with the default surface, clock and navigator.
    pub fn new(config: Config) -> Self {
        Self::builder().config(config).build()
    }

    /// Start building a controller.
    pub fn builder() -> AutocompleteBuilder<ListSurface> {
        AutocompleteBuilder::new()
    }
}

impl<S: PresentationSurface> Autocomplete<S> {
    // =========================================================================
    // Attachment
    // =========================================================================

    /// Attach a dropdown to `input`, fed by `handler`.
    ///
    /// Returns `Ok(None)` when no input is supplied, so optional call sites
    /// need no special casing. A missing handler is an error.
    pub fn attach(
        &mut self,
        input: Option<SharedInput>,
        handler: Option<SharedLookup>,
    ) -> Result<Option<InputId>> {
        let Some(input) = input else {
            tracing::debug!(target: targets::CONTROLLER, "attach without input ignored");
            return Ok(None);
        };
        let handler = handler.ok_or(Error::MissingHandler)?;

        if self.surface.is_none() {
            if let Some(factory) = self.surface_factory.take() {
                tracing::debug!(target: targets::CONTROLLER, "creating shared surface");
                self.surface = Some(factory());
            }
        }

        input.lock().set_native_autocomplete(false);
        let id = self.inputs.insert(InputState {
            input,
            handler,
            query: QueryCoordinator::new(),
            selection: Selection::new(),
            debounce: Debouncer::new(self.config.delay),
        });
        tracing::debug!(target: targets::CONTROLLER, ?id, "input attached");
        Ok(Some(id))
    }

    /// Attach `input` with a concrete handler.
    pub fn attach_lookup(
        &mut self,
        input: SharedInput,
        handler: impl LookupHandler + 'static,
    ) -> Result<Option<InputId>> {
        self.attach(Some(input), Some(Arc::new(handler)))
    }

    /// Detach an input. Its dropdown closes and late answers are dropped.
    pub fn detach(&mut self, id: InputId) -> Result<()> {
        self.hide(id);
        let state = self.inputs.remove(id).ok_or(Error::UnknownInput(id))?;
        state.input.lock().set_native_autocomplete(true);
        tracing::debug!(target: targets::CONTROLLER, ?id, "input detached");
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The shared surface, once the first input is attached.
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// The input the dropdown is currently shown for.
    pub fn owner(&self) -> Option<InputId> {
        self.owner
    }

    /// Whether the dropdown is visible.
    pub fn is_open(&self) -> bool {
        self.surface.as_ref().is_some_and(|s| s.is_open())
    }

    /// Number of attached inputs.
    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }

    fn state(&self, id: InputId) -> Result<&InputState> {
        self.inputs.get(id).ok_or(Error::UnknownInput(id))
    }

    /// Selection state for an input.
    pub fn selection_state(&self, id: InputId) -> Result<SelectionState> {
        Ok(self.state(id)?.selection.state())
    }

    /// The highlighted row for an input, `-1` when none.
    pub fn selection_index(&self, id: InputId) -> Result<isize> {
        Ok(self.state(id)?.selection.index())
    }

    /// The live result set for an input.
    pub fn items(&self, id: InputId) -> Result<&[Item]> {
        Ok(self.state(id)?.selection.items())
    }

    /// The token of the newest lookup dispatched for an input.
    pub fn latest_token(&self, id: InputId) -> Result<Option<QueryToken>> {
        Ok(self.state(id)?.query.latest())
    }

    /// Whether a debounced search is waiting for an input.
    pub fn has_pending_search(&self, id: InputId) -> Result<bool> {
        Ok(self.state(id)?.debounce.is_pending())
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Handle a host event for an attached input.
    ///
    /// Answers that handlers gave synchronously are applied before returning.
    pub fn handle_event(&mut self, id: InputId, event: WidgetEvent) -> Result<EventOutcome> {
        if !self.inputs.contains_key(id) {
            return Err(Error::UnknownInput(id));
        }
        tracing::trace!(target: targets::CONTROLLER, ?id, ?event, "event");

        let outcome = match event {
            WidgetEvent::Focus => {
                self.search_input(id);
                EventOutcome::IGNORED
            }
            WidgetEvent::Blur { related } => {
                if related != FocusTarget::DropdownLink {
                    if let Some(state) = self.inputs.get_mut(id) {
                        state.debounce.cancel();
                    }
                    self.hide(id);
                }
                EventOutcome::IGNORED
            }
            WidgetEvent::OutsideClick => {
                self.hide(id);
                EventOutcome::IGNORED
            }
            WidgetEvent::Input { kind, key } => {
                if kind.is_discrete() {
                    self.search_input(id);
                } else {
                    self.schedule_search(id, key);
                }
                EventOutcome::IGNORED
            }
            WidgetEvent::KeyDown(key) => self.key_down(id, key),
            WidgetEvent::KeyUp(key) => {
                if !key.is_control_or_navigation() {
                    self.schedule_search(id, Some(key));
                }
                EventOutcome::IGNORED
            }
            WidgetEvent::RowMouseDown { index, button } => self.row_mouse_down(id, index, button),
        };

        self.drain_inbox();
        Ok(outcome)
    }

    fn schedule_search(&mut self, id: InputId, key: Option<KeyEvent>) {
        let now = self.clock.now();
        if let Some(state) = self.inputs.get_mut(id) {
            state.debounce.call(key, now);
        }
    }

    fn key_down(&mut self, id: InputId, key: KeyEvent) -> EventOutcome {
        if key.is_control() {
            return EventOutcome::IGNORED;
        }
        match key.key {
            Key::ArrowUp => {
                let navigation = match self.inputs.get_mut(id) {
                    Some(state) => state.selection.move_up(),
                    None => Navigation::Unchanged,
                };
                self.apply_navigation(id, navigation);
                EventOutcome::PREVENTED
            }
            Key::ArrowDown => {
                let navigation = match self.inputs.get_mut(id) {
                    Some(state) => state.selection.move_down(),
                    None => Navigation::Unchanged,
                };
                if navigation == Navigation::Reopen {
                    self.search_input(id);
                } else {
                    self.apply_navigation(id, navigation);
                }
                EventOutcome::PREVENTED
            }
            Key::Tab | Key::Enter => {
                let item = self
                    .inputs
                    .get(id)
                    .and_then(|state| state.selection.selected_item())
                    .cloned();
                match item {
                    Some(item) => {
                        self.commit(id, item);
                        EventOutcome::PREVENTED
                    }
                    None => EventOutcome::IGNORED,
                }
            }
            Key::Escape => {
                self.hide(id);
                EventOutcome::IGNORED
            }
            _ => EventOutcome::IGNORED,
        }
    }

    fn apply_navigation(&mut self, id: InputId, navigation: Navigation) {
        let Navigation::Moved { from, to } = navigation else {
            return;
        };
        tracing::trace!(target: targets::SELECTION, ?id, ?from, ?to, "highlight moved");
        if self.owner != Some(id) {
            return;
        }
        if let Some(surface) = self.surface.as_mut() {
            if let Some(from) = from {
                surface.set_selected(from, false);
            }
            if let Some(to) = to {
                surface.set_selected(to, true);
            }
        }
    }

    fn row_mouse_down(&mut self, id: InputId, index: usize, button: MouseButton) -> EventOutcome {
        if button != MouseButton::Primary || self.owner != Some(id) {
            return EventOutcome::IGNORED;
        }
        let item = self
            .inputs
            .get(id)
            .and_then(|state| state.selection.items().get(index))
            .cloned();
        match item {
            Some(item) if !item.is_header() => {
                self.commit(id, item);
                EventOutcome::PREVENTED
            }
            _ => EventOutcome::IGNORED,
        }
    }

    /// Report a new viewport size. An open dropdown is realigned.
    pub fn viewport_resized(&mut self, viewport: Size) {
        self.viewport = viewport;
        if let Some(owner) = self.owner {
            self.align(owner);
        }
    }

    /// Close whichever dropdown is open, as for a click outside every input.
    pub fn dismiss(&mut self) {
        if let Some(owner) = self.owner {
            self.hide(owner);
        }
    }

    // =========================================================================
    // Query lifecycle
    // =========================================================================

    /// Run a lookup for the input's current text right away.
    pub fn search(&mut self, id: InputId) -> Result<()> {
        if !self.inputs.contains_key(id) {
            return Err(Error::UnknownInput(id));
        }
        self.search_input(id);
        self.drain_inbox();
        Ok(())
    }

    #[tracing::instrument(skip(self), target = "autocomplete::query", level = "debug")]
    fn search_input(&mut self, id: InputId) {
        let Some(state) = self.inputs.get(id) else {
            return;
        };
        let text = state.input.lock().text();
        let length = text.graphemes(true).count();
        if length < self.config.min_input_length {
            tracing::trace!(target: targets::QUERY, length, min = self.config.min_input_length, "input too short");
            self.hide(id);
            return;
        }

        self.claim_surface(id);
        if let Some(surface) = self.surface.as_mut() {
            surface.show_loading(&self.config.loading_string);
            surface.open();
        }
        self.align(id);

        let Some(state) = self.inputs.get_mut(id) else {
            return;
        };
        state.selection.begin_loading();
        let token = state.query.begin(text.as_str());
        let handler = Arc::clone(&state.handler);
        tracing::debug!(target: targets::QUERY, ?id, ?token, query = %text, "dispatching lookup");

        let responder = Responder::new(id, token, self.inbox_tx.clone());
        handler.lookup(&text, responder);
    }

    /// Fire due debounced searches and apply queued lookup answers.
    ///
    /// Returns the number of searches fired plus answers applied.
    pub fn process_pending(&mut self) -> usize {
        let now = self.clock.now();
        let due: Vec<(InputId, Option<KeyEvent>)> = self
            .inputs
            .iter_mut()
            .filter_map(|(id, state)| state.debounce.poll(now).map(|key| (id, key)))
            .collect();

        let mut handled = 0;
        for (id, key) in due {
            if key.is_some_and(|key| key.is_control_or_navigation()) {
                tracing::trace!(target: targets::QUERY, ?id, ?key, "navigation key, no search");
                continue;
            }
            self.search_input(id);
            handled += 1;
        }
        handled + self.drain_inbox()
    }

    /// The instant the next debounced search becomes due.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.inputs
            .values()
            .filter_map(|state| state.debounce.deadline())
            .min()
    }

    fn drain_inbox(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(delivery) = self.inbox.try_recv() {
            self.apply_delivery(delivery);
            applied += 1;
        }
        applied
    }

    #[tracing::instrument(skip_all, target = "autocomplete::query", level = "debug", fields(input = ?delivery.input, token = ?delivery.token))]
    fn apply_delivery(&mut self, delivery: Delivery) {
        let Delivery {
            input: id,
            token,
            response,
        } = delivery;
        let Some(state) = self.inputs.get_mut(id) else {
            tracing::trace!(target: targets::QUERY, "answer for detached input dropped");
            return;
        };

        let items = match state.query.resolve(token, response, self.config.limit) {
            Resolution::Install(items) => items,
            resolution => {
                tracing::debug!(target: targets::QUERY, ?resolution, "answer suppressed");
                self.hide(id);
                return;
            }
        };

        if state.selection.is_closed() {
            tracing::debug!(target: targets::QUERY, "dropdown dismissed before answer arrived");
            return;
        }
        let highlight = if self.config.highlight {
            state.query.latest_query().map(str::to_owned)
        } else {
            None
        };
        state.selection.install(items);
        if state.selection.is_closed() {
            self.hide(id);
            return;
        }

        if self.owner == Some(id) {
            if let (Some(surface), Some(state)) = (self.surface.as_mut(), self.inputs.get(id)) {
                surface.render(state.selection.items(), highlight.as_deref());
            }
            self.align(id);
        }
        tracing::debug!(target: targets::QUERY, rows = self.surface.as_ref().map_or(0, |s| s.row_count()), "answer installed");
    }

    // =========================================================================
    // Commit
    // =========================================================================

    /// Commit `item` into the input.
    ///
    /// Disabled items and headers are ignored and yield `None`. Otherwise
    /// listeners of [`selected`](Self::selected) are notified, the input is
    /// filled, link items are opened, and the dropdown closes. The returned
    /// event tells whether a listener called `prevent_default`.
    pub fn select_item(&mut self, id: InputId, item: Item) -> Result<Option<SelectEvent>> {
        if !self.inputs.contains_key(id) {
            return Err(Error::UnknownInput(id));
        }
        Ok(self.commit(id, item))
    }

    fn commit(&mut self, id: InputId, item: Item) -> Option<SelectEvent> {
        if !item.is_selectable() {
            tracing::trace!(target: targets::SELECTION, ?id, "item not selectable");
            return None;
        }
        let input = Arc::clone(&self.inputs.get(id)?.input);

        let event = SelectEvent::new(id, item);
        self.selected.emit(event.clone());

        let item = event.item();
        if let Some(value) = item.commit_value() {
            input.lock().set_text(&value);
        }
        if let Some(href) = item.href() {
            if let Err(err) = self.navigator.navigate(href) {
                tracing::warn!(target: targets::CONTROLLER, %err, "navigation failed");
            }
        }
        tracing::debug!(target: targets::SELECTION, ?id, prevented = event.is_default_prevented(), "item committed");

        self.hide(id);
        Some(event)
    }

    // =========================================================================
    // Surface management
    // =========================================================================

    /// Close the dropdown for an input and clear its highlight.
    pub fn hide(&mut self, id: InputId) {
        if let Some(state) = self.inputs.get_mut(id) {
            state.selection.close();
        }
        if self.owner == Some(id) {
            if let Some(surface) = self.surface.as_mut() {
                surface.close();
            }
            self.owner = None;
            tracing::trace!(target: targets::SURFACE, ?id, "dropdown hidden");
        }
    }

    /// Make `id` the input the surface shows a dropdown for.
    fn claim_surface(&mut self, id: InputId) {
        match self.owner {
            Some(previous) if previous != id => {
                if let Some(state) = self.inputs.get_mut(previous) {
                    state.selection.close();
                }
                tracing::trace!(target: targets::SURFACE, ?previous, ?id, "surface changes owner");
            }
            _ => {}
        }
        self.owner = Some(id);
    }

    fn align(&mut self, id: InputId) {
        let Some(state) = self.inputs.get(id) else {
            return;
        };
        let anchor = state.input.lock().bounds();
        if let Some(surface) = self.surface.as_mut() {
            surface.align(anchor, self.viewport, self.config.rtl);
        }
    }
}

impl<S> fmt::Debug for Autocomplete<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Autocomplete")
            .field("config", &self.config)
            .field("inputs", &self.inputs.len())
            .field("owner", &self.owner)
            .field("viewport", &self.viewport)
            .field("surface_created", &self.surface.is_some())
            .finish()
    }
}

static_assertions::assert_impl_all!(Autocomplete: Send);
static_assertions::assert_impl_all!(Responder: Send, Sync);
