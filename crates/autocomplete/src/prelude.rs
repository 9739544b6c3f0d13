//! Prelude module for the autocomplete controller.
//!
//! ```ignore
//! use autocomplete::prelude::*;
//! ```
//!
//! This provides access to:
//! - The controller and its events (`Autocomplete`, `WidgetEvent`)
//! - Lookup handlers (`LookupHandler`, `Responder`, `StaticLookup`)
//! - Host collaborators (`TextInput`, `LineInput`, `PresentationSurface`)
//! - Input vocabulary and geometry (`Key`, `KeyEvent`, `Rect`, `Size`)

// ============================================================================
// Controller
// ============================================================================

pub use crate::{Autocomplete, Config, EventOutcome, InputId, SelectEvent, WidgetEvent};

// ============================================================================
// Suggestions
// ============================================================================

pub use crate::{Entry, Item, LookupHandler, Responder, Response, StaticLookup};

// ============================================================================
// Host Collaborators
// ============================================================================

pub use crate::{LineInput, ListSurface, PresentationSurface, TextInput};

// ============================================================================
// Input Events and Geometry
// ============================================================================

pub use crate::{FocusTarget, InputKind, Key, KeyEvent, Modifiers, MouseButton, Rect, Size};
