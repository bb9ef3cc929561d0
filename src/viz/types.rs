//! Public types and constants for the visualization module.

use serde::{Deserialize, Serialize};

/// Legend placement options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LegendMode {
    /// Overlay legend inside the plotting area (may overlap bars).
    Inside,
    /// Separate, non-overlapping legend band under the chart.
    Bottom,
}

/// Horizontal legend below the chart, as in the interactive view.
pub const DEFAULT_LEGEND_MODE: LegendMode = LegendMode::Bottom;

/// Share of a day left empty on each side of a bar.
pub const BAR_INSET: f64 = 0.08;
