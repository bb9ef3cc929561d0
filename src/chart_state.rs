//! Mutable view state of the chart: visible window, in-flight zoom gesture,
//! and pointer selection.
//!
//! The view owns one `ChartState` and drives it from gesture callbacks:
//!
//! ```
//! use userchart::{ChartState, Dataset};
//!
//! let data = Dataset::load_embedded()?;
//! let mut state = ChartState::for_dataset(&data).expect("non-empty dataset");
//!
//! state.begin_zoom();
//! state.update_zoom(0.5, 1.5);
//! state.update_zoom(0.5, 3.0); // relative to the captured base, not the previous frame
//! state.end_zoom();
//!
//! state.begin_drag();
//! let at = state.window().start();
//! assert!(state.drag_to(&data, at).is_some());
//! state.end_drag();
//! assert!(state.selected_row(&data).is_none());
//! # Ok::<(), userchart::DatasetError>(())
//! ```

use crate::dataset::Dataset;
use crate::models::{DateRange, Row};
use crate::selection::{PointerState, nearest_index};
use crate::window;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct ChartState {
    total: DateRange,
    window: DateRange,
    /// Window at the start of the current zoom gesture.
    zoom_base: Option<DateRange>,
    pointer: PointerState,
}

impl ChartState {
    /// Start fully zoomed out over `total`.
    pub fn new(total: DateRange) -> Self {
        Self {
            total,
            window: total,
            zoom_base: None,
            pointer: PointerState::Idle,
        }
    }

    /// `None` when the dataset has no rows.
    pub fn for_dataset(dataset: &Dataset) -> Option<Self> {
        dataset.total_range().map(Self::new)
    }

    pub fn total(&self) -> DateRange {
        self.total
    }

    pub fn window(&self) -> DateRange {
        self.window
    }

    pub fn is_zooming(&self) -> bool {
        self.zoom_base.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.pointer.is_dragging()
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    /// Capture the current window as the base of a new zoom gesture.
    pub fn begin_zoom(&mut self) {
        if self.zoom_base.is_none() {
            log::debug!("zoom gesture started on {:?}", self.window);
            self.zoom_base = Some(self.window);
        }
    }

    /// Apply the gesture's cumulative `magnification` around `anchor_fraction`.
    /// Starts a gesture implicitly when none is active.
    pub fn update_zoom(&mut self, anchor_fraction: f64, magnification: f64) -> DateRange {
        self.begin_zoom();
        let base = self.zoom_base.unwrap_or(self.window);
        self.window = window::zoom(anchor_fraction, magnification, &base, &self.total);
        self.window
    }

    /// Drop the captured base; the next gesture starts from the current window.
    pub fn end_zoom(&mut self) {
        if self.zoom_base.take().is_some() {
            log::debug!("zoom gesture ended on {:?}", self.window);
        }
    }

    /// Back to the full range.
    pub fn reset_zoom(&mut self) {
        self.zoom_base = None;
        self.window = self.total;
    }

    /// Replace the window directly (clamped into the total range).
    pub fn set_window(&mut self, range: DateRange) {
        self.window = window::clamp_range(&range, &self.total);
    }

    pub fn begin_drag(&mut self) {
        self.pointer.begin();
    }

    /// Select the visible row nearest to `date`. Ignored unless a drag is active.
    pub fn drag_to<'a>(&mut self, dataset: &'a Dataset, date: DateTime<Utc>) -> Option<&'a Row> {
        if !self.pointer.is_dragging() {
            return None;
        }
        let visible = dataset.window_indices(&self.window);
        let offset = visible.start;
        let index = nearest_index(&dataset.rows()[visible], date).map(|i| i + offset);
        if index != self.pointer.selected() {
            log::debug!("selected row {index:?}");
        }
        self.pointer.select(index);
        index.and_then(|i| dataset.get(i))
    }

    pub fn end_drag(&mut self) {
        self.pointer.end();
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.pointer.selected()
    }

    pub fn selected_row<'a>(&self, dataset: &'a Dataset) -> Option<&'a Row> {
        self.selected_index().and_then(|i| dataset.get(i))
    }
}
