//! Keyboard selection state for one input.
//!
//! ```text
//!            install(non-empty)            move_down
//!  Closed ─────────────────────▶ Open(None) ─────────▶ Open(Some(0)) ─▶ …
//!    ▲   begin_loading ▲             ▲      move_up from 0  │
//!    │        │        │             └──────────────────────┘
//!    └──── close (escape, blur, commit, empty/stale response) ──────────┘
//! ```
//!
//! Navigation never wraps: moving down from the last row stays put, moving up
//! from the first row clears the highlight.

use crate::item::Item;

/// Observable state of the dropdown for one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    /// No dropdown for this input.
    Closed,
    /// A lookup is in flight; the loading row is shown.
    Loading,
    /// Results are shown with nothing highlighted.
    OpenNoSelection,
    /// Results are shown with row `i` highlighted.
    OpenSelected(usize),
}

/// The effect of a navigation key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// The highlight moved. The surface should unhighlight `from` and
    /// highlight `to`.
    Moved {
        from: Option<usize>,
        to: Option<usize>,
    },
    /// Nothing changed.
    Unchanged,
    /// Nothing is open for this input; a new lookup should run instead.
    Reopen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Phase {
    #[default]
    Closed,
    Loading,
    Open,
}

/// Tracks the live result set and the highlighted row.
#[derive(Debug, Default)]
pub struct Selection {
    phase: Phase,
    items: Vec<Item>,
    index: Option<usize>,
}

impl Selection {
    /// Create a closed selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current state.
    pub fn state(&self) -> SelectionState {
        match (self.phase, self.index) {
            (Phase::Closed, _) => SelectionState::Closed,
            (Phase::Loading, _) => SelectionState::Loading,
            (Phase::Open, None) => SelectionState::OpenNoSelection,
            (Phase::Open, Some(i)) => SelectionState::OpenSelected(i),
        }
    }

    /// The highlighted row, or `-1` when nothing is highlighted.
    pub fn index(&self) -> isize {
        self.index.map_or(-1, |i| i as isize)
    }

    /// The highlighted row.
    pub fn selected_index(&self) -> Option<usize> {
        self.index
    }

    /// The highlighted item.
    pub fn selected_item(&self) -> Option<&Item> {
        self.index.and_then(|i| self.items.get(i))
    }

    /// The live result set.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Whether nothing is shown for this input.
    pub fn is_closed(&self) -> bool {
        self.phase == Phase::Closed
    }

    /// A lookup was dispatched: drop the old result set and show loading.
    pub fn begin_loading(&mut self) {
        self.phase = Phase::Loading;
        self.items.clear();
        self.index = None;
    }

    /// Install a new result set with nothing highlighted.
    ///
    /// An empty set closes instead.
    pub fn install(&mut self, items: Vec<Item>) {
        self.index = None;
        if items.is_empty() {
            self.close();
        } else {
            self.items = items;
            self.phase = Phase::Open;
        }
    }

    /// Close and forget the result set.
    pub fn close(&mut self) {
        self.phase = Phase::Closed;
        self.items.clear();
        self.index = None;
    }

    /// Handle "move down".
    pub fn move_down(&mut self) -> Navigation {
        match self.phase {
            Phase::Closed => Navigation::Reopen,
            Phase::Loading => Navigation::Unchanged,
            Phase::Open => {
                let next = self.index.map_or(0, |i| i + 1);
                if next >= self.items.len() {
                    return Navigation::Unchanged;
                }
                let from = self.index.replace(next);
                Navigation::Moved {
                    from,
                    to: Some(next),
                }
            }
        }
    }

    /// Handle "move up".
    pub fn move_up(&mut self) -> Navigation {
        match self.index {
            None => Navigation::Unchanged,
            Some(i) => {
                let to = i.checked_sub(1);
                self.index = to;
                Navigation::Moved { from: Some(i), to }
            }
        }
    }
}
