//! Suggestion dropdowns for text inputs.
//!
//! Attach an [`Autocomplete`] controller to any number of text fields. As the
//! user types, the controller waits for a quiet period, asks a
//! [`LookupHandler`] for suggestions, and shows them in a dropdown that can be
//! driven from the keyboard or mouse. Committing a suggestion fills the field
//! and notifies listeners through [`Autocomplete::selected`].
//!
//! The controller is host-agnostic: hosts forward [`WidgetEvent`]s, render
//! from a [`PresentationSurface`] (the bundled [`ListSurface`] keeps the
//! dropdown as plain data), and call [`Autocomplete::process_pending`] from
//! their event loop.
//!
//! # Example
//!
//! ```
//! use autocomplete::prelude::*;
//!
//! let mut autocomplete = Autocomplete::new(Config::default().with_min_input_length(1));
//! let city = LineInput::new(Rect::new(20.0, 40.0, 240.0, 28.0)).shared();
//!
//! let cities = |query: &str, responder: Responder| {
//!     let all = ["Berlin", "Bern", "Bergen", "Boston"];
//!     responder.items(all.iter().filter(|c| c.starts_with(query)).copied());
//! };
//! let id = autocomplete.attach_lookup(city.clone(), cities)?.expect("input supplied");
//!
//! autocomplete.selected.connect(|event| {
//!     println!("picked {}", event.item().label());
//! });
//!
//! city.lock().set_text("Ber");
//! let _ = autocomplete.handle_event(id, WidgetEvent::paste())?;
//! assert_eq!(autocomplete.items(id)?.len(), 3);
//!
//! let _ = autocomplete.handle_event(id, WidgetEvent::click_row(1))?;
//! assert_eq!(city.lock().text(), "Bern");
//! # Ok::<(), autocomplete::Error>(())
//! ```
//!
//! # Logging
//!
//! Diagnostics go through [`tracing`] under the `autocomplete::*` targets
//! listed in [`logging::targets`].

mod config;
mod controller;
mod error;
mod input;
mod item;
mod list_surface;
mod lookup;
pub mod prelude;
mod query;
mod selection;
mod surface;

pub use autocomplete_core::{
    Clock, FocusTarget, InputKind, Key, KeyEvent, ManualClock, Modifiers, MouseButton, Point,
    Rect, Signal, Size, SystemClock, logging,
};

pub use config::{
    Config, DEFAULT_DELAY, DEFAULT_LIMIT, DEFAULT_LOADING_STRING, DEFAULT_MIN_INPUT_LENGTH,
};
pub use controller::{
    Autocomplete, AutocompleteBuilder, DEFAULT_VIEWPORT, EventOutcome, WidgetEvent,
};
pub use error::{Error, Result};
pub use input::{
    InputId, LineInput, Navigator, SELECT_EVENT, SelectEvent, SharedInput, SystemNavigator,
    TextInput,
};
pub use item::{Entry, Item};
pub use list_surface::{
    CLASS_DISABLED, CLASS_HEADER, CLASS_ITEM, CLASS_LINK, CLASS_LOADING, CLASS_SELECTED,
    ListSurface, Row, RowKind, RowMetrics,
};
#[cfg(feature = "tokio")]
pub use lookup::AsyncLookup;
pub use lookup::{
    CaseSensitivity, LookupHandler, MatchMode, Responder, Response, SharedLookup, StaticLookup,
};
pub use query::{QueryCoordinator, QueryToken, Resolution};
pub use selection::{Navigation, Selection, SelectionState};
pub use surface::{HorizontalAnchor, Placement, PresentationSurface, compute_placement};
