//! userchart
//!
//! A small Rust library for preparing a stacked, date-windowed bar chart of app
//! users (active vs. new) with tap-to-inspect and pinch-to-zoom. Pairs with the
//! `userchart` CLI and the `userchart-gui` desktop view.
//!
//! ### Features
//! - Embedded 71-day sample dataset, parsed once from CSV
//! - Noon-anchored, evenly strided date-axis ticks (`axis`)
//! - Zoom window arithmetic clamped to the data range (`window`)
//! - Nearest-row selection and pointer state machine (`selection`, `chart_state`)
//! - SVG/PNG rendering of the current window (`viz`)
//!
//! ### Example
//! ```no_run
//! use chrono::Local;
//! use userchart::{ChartConfig, ChartState, Dataset};
//!
//! let data = Dataset::load_embedded()?;
//! let mut state = ChartState::for_dataset(&data).expect("dataset has rows");
//! state.update_zoom(0.5, 2.0);
//! state.end_zoom();
//! userchart::viz::plot_usage(&data, &state, "users.svg", &ChartConfig::default(), &Local)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod axis;
pub mod chart_state;
pub mod config;
pub mod dataset;
pub mod models;
pub mod readout;
pub mod scale;
pub mod selection;
pub mod viz;
pub mod window;

pub use axis::x_axis_date_values;
pub use chart_state::ChartState;
pub use config::ChartConfig;
pub use dataset::{Dataset, DatasetError};
pub use models::{DateRange, RangeError, Row, UserType};
pub use scale::TimeScale;
pub use selection::{PointerState, nearest_to};
