//! A headless presentation surface.
//!
//! [`ListSurface`] keeps the dropdown as plain data: a list of [`Row`]s with
//! their style classes, a visibility flag and the last computed
//! [`Placement`]. Hosts can paint from it directly; tests inspect it.

use std::ops::Range;

use autocomplete_core::logging::targets;
use autocomplete_core::{PerfSpan, Rect, Size};
use unicode_segmentation::UnicodeSegmentation;

use crate::item::Item;
use crate::surface::{Placement, PresentationSurface, compute_placement};

/// Class applied to every row.
pub const CLASS_ITEM: &str = "ac-item";
/// Class applied to header rows.
pub const CLASS_HEADER: &str = "ac-header";
/// Class applied to the loading placeholder.
pub const CLASS_LOADING: &str = "loading";
/// Class applied to the highlighted row.
pub const CLASS_SELECTED: &str = "is-selected";
/// Class applied to disabled rows.
pub const CLASS_DISABLED: &str = "disabled";
/// Class applied to rows carrying a link.
pub const CLASS_LINK: &str = "ac-link";

/// The kind of a rendered row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// A selectable suggestion.
    Item,
    /// A header or separator.
    Header,
    /// The loading placeholder.
    Loading,
}

/// One rendered row.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub kind: RowKind,
    pub label: String,
    /// Secondary label (`ac-sub`).
    pub sub: Option<String>,
    pub href: Option<String>,
    pub disabled: bool,
    pub selected: bool,
    /// Byte ranges of `label` matching the query.
    pub highlights: Vec<Range<usize>>,
}

impl Row {
    fn from_item(item: &Item, highlight: Option<&str>) -> Self {
        let label = item.label().into_owned();
        let highlights = match highlight {
            Some(query) if !item.is_header() => match_ranges(&label, query),
            _ => Vec::new(),
        };
        Self {
            kind: if item.is_header() {
                RowKind::Header
            } else {
                RowKind::Item
            },
            label,
            sub: item.sub().map(str::to_owned),
            href: item.href().map(str::to_owned),
            disabled: item.is_disabled(),
            selected: false,
            highlights,
        }
    }

    fn loading(text: &str) -> Self {
        Self {
            kind: RowKind::Loading,
            label: text.to_owned(),
            sub: None,
            href: None,
            disabled: false,
            selected: false,
            highlights: Vec::new(),
        }
    }

    /// Whether the row is a link.
    pub fn is_link(&self) -> bool {
        self.href.is_some()
    }

    /// Style classes for this row.
    pub fn classes(&self) -> Vec<&'static str> {
        let mut classes = vec![CLASS_ITEM];
        match self.kind {
            RowKind::Header => classes.push(CLASS_HEADER),
            RowKind::Loading => {
                classes.push(CLASS_HEADER);
                classes.push(CLASS_LOADING);
            }
            RowKind::Item => {}
        }
        if self.is_link() {
            classes.push(CLASS_LINK);
        }
        if self.disabled {
            classes.push(CLASS_DISABLED);
        }
        if self.selected {
            classes.push(CLASS_SELECTED);
        }
        classes
    }

    /// Width in grapheme clusters of the widest text on the row.
    fn text_columns(&self) -> usize {
        let label = self.label.graphemes(true).count();
        let sub = self
            .sub
            .as_deref()
            .map_or(0, |sub| sub.graphemes(true).count());
        label.max(sub)
    }
}

/// Byte ranges of ASCII-case-insensitive, non-overlapping matches of `query`.
fn match_ranges(label: &str, query: &str) -> Vec<Range<usize>> {
    if query.is_empty() {
        return Vec::new();
    }
    let haystack = label.to_ascii_lowercase();
    let needle = query.to_ascii_lowercase();
    haystack
        .match_indices(&needle)
        .map(|(start, matched)| start..start + matched.len())
        .collect()
}

/// Text metrics used to estimate the dropdown's width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowMetrics {
    /// Width of one grapheme cluster.
    pub column_width: f32,
    /// Horizontal padding added to every row.
    pub padding: f32,
}

impl Default for RowMetrics {
    fn default() -> Self {
        Self {
            column_width: 8.0,
            padding: 16.0,
        }
    }
}

/// In-memory dropdown model.
#[derive(Debug, Clone, Default)]
pub struct ListSurface {
    rows: Vec<Row>,
    open: bool,
    metrics: RowMetrics,
    placement: Option<Placement>,
}

impl ListSurface {
    /// Create an empty, hidden surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use custom text metrics using builder pattern.
    pub fn with_metrics(mut self, metrics: RowMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// The rendered rows.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Labels of the rendered rows, in order.
    pub fn labels(&self) -> Vec<&str> {
        self.rows.iter().map(|row| row.label.as_str()).collect()
    }

    /// Index of the highlighted row.
    pub fn selected_row(&self) -> Option<usize> {
        self.rows.iter().position(|row| row.selected)
    }

    /// Whether the surface shows only the loading placeholder.
    pub fn is_loading(&self) -> bool {
        matches!(self.rows.as_slice(), [row] if row.kind == RowKind::Loading)
    }

    /// The last computed placement.
    pub fn placement(&self) -> Option<Placement> {
        self.placement
    }

    /// Estimated content width of the dropdown.
    pub fn content_width(&self) -> f32 {
        let columns = self.rows.iter().map(Row::text_columns).max().unwrap_or(0);
        columns as f32 * self.metrics.column_width + self.metrics.padding
    }
}

impl PresentationSurface for ListSurface {
    fn show_loading(&mut self, text: &str) {
        self.rows.clear();
        self.rows.push(Row::loading(text));
    }

    fn render(&mut self, items: &[Item], highlight: Option<&str>) {
        let _span = PerfSpan::new("render_rows");
        self.rows = items
            .iter()
            .map(|item| Row::from_item(item, highlight))
            .collect();
        tracing::trace!(target: targets::SURFACE, rows = self.rows.len(), "rendered rows");
    }

    fn set_selected(&mut self, index: usize, selected: bool) {
        if let Some(row) = self.rows.get_mut(index) {
            row.selected = selected;
        }
    }

    fn open(&mut self) {
        self.open = true;
    }

    fn close(&mut self) {
        self.open = false;
        for row in &mut self.rows {
            row.selected = false;
        }
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn align(&mut self, anchor: Rect, viewport: Size, rtl: bool) -> Placement {
        let width = self.content_width().max(anchor.width());
        let placement = compute_placement(anchor, width, viewport, rtl);
        tracing::trace!(target: targets::SURFACE, ?placement, width, "aligned dropdown");
        self.placement = Some(placement);
        placement
    }
}
