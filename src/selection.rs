//! Tap/drag row inspection.

use crate::models::Row;
use chrono::{DateTime, Utc};

/// Index of the row closest in time to `query`. Equidistant rows resolve to
/// the earlier one. `None` for an empty slice.
pub fn nearest_index(rows: &[Row], query: DateTime<Utc>) -> Option<usize> {
    rows.iter()
        .enumerate()
        // min_by_key keeps the first of several equal minima
        .min_by_key(|(_, r)| (r.sample_date - query).abs())
        .map(|(i, _)| i)
}

/// Row closest in time to `query`; see [`nearest_index`].
pub fn nearest_to(rows: &[Row], query: DateTime<Utc>) -> Option<&Row> {
    nearest_index(rows, query).map(|i| &rows[i])
}

/// Pointer interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerState {
    #[default]
    Idle,
    /// A press/drag is in progress. `selected` indexes into the dataset.
    Dragging { selected: Option<usize> },
}

impl PointerState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, PointerState::Dragging { .. })
    }

    pub fn selected(&self) -> Option<usize> {
        match self {
            PointerState::Idle => None,
            PointerState::Dragging { selected } => *selected,
        }
    }

    /// Idle -> Dragging. Already dragging: no change.
    pub fn begin(&mut self) {
        if !self.is_dragging() {
            *self = PointerState::Dragging { selected: None };
        }
    }

    /// Record the row under the pointer. Ignored while idle.
    pub fn select(&mut self, index: Option<usize>) {
        if let PointerState::Dragging { selected } = self {
            *selected = index;
        }
    }

    /// Back to idle; the selection is dropped.
    pub fn end(&mut self) {
        *self = PointerState::Idle;
    }
}
