//! Visualization: render the stacked user-type bar chart to **SVG** or **PNG**.
//!
//! - One bar per visible day, spanning the local calendar day
//! - Active users stacked under new users (legend order)
//! - X-axis labels at the sampled noon ticks, locale-aware value labels
//! - Legend placement: `Bottom` band or `Inside` overlay
//! - Selected row outlined, with its readout above the plot

pub mod legend;
pub mod text;
pub mod types;
pub mod util;

// Re-export types for public API
pub use types::{BAR_INSET, DEFAULT_LEGEND_MODE, LegendMode};

use crate::axis::x_axis_date_values;
use crate::chart_state::ChartState;
use crate::config::ChartConfig;
use crate::dataset::Dataset;
use crate::models::{UserType, legend as legend_items};
use crate::readout::readout as readout_text;
use anyhow::{Result, anyhow};
use chrono::TimeZone;

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use std::fmt::Display;
use std::path::Path;
use std::sync::Once;

use legend::{LEGEND_BAND_PX, draw_legend_band};
use text::truncate_to_width;
use util::{compute_left_label_area_px, format_count, map_locale, nice_axis_max, rgb_color};

const MARGIN: i32 = 16;
const READOUT_BAND_PX: i32 = 28;
const Y_LABELS: usize = 8;
const TICK_LABEL_FORMAT: &str = "%b %-d";
const TICK_MARK_PX: i32 = 5;

static INIT_FONTS: Once = Once::new();

/// Register the sans-serif face every chart label uses; `ab_glyph` does not discover OS fonts.
fn ensure_fonts_registered() {
    INIT_FONTS.call_once(|| {
        if plotters::style::register_font(
            "sans-serif",
            plotters::style::FontStyle::Normal,
            epaint_default_fonts::UBUNTU_LIGHT,
        )
        .is_err()
        {
            log::warn!("bundled chart font could not be parsed");
        }
    });
}

/// One stacked bar: x in the caller's horizontal units (epoch seconds for plotters), y in users.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub x0: f64,
    pub x1: f64,
    pub active: f64,
    pub total: f64,
    pub selected: bool,
}

impl Bar {
    /// Vertical extent of the `user_type` segment.
    pub fn segment(&self, user_type: UserType) -> (f64, f64) {
        match user_type {
            UserType::Active => (0.0, self.active),
            UserType::New => (self.active, self.total),
        }
    }
}

/// Everything the backend needs to draw one frame, with time zones resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct UsageFrame {
    pub bars: Vec<Bar>,
    /// Tick position (epoch seconds) and label.
    pub ticks: Vec<(f64, String)>,
    pub x_min: f64,
    pub x_max: f64,
    pub y_max: f64,
    pub readout: Option<String>,
}

impl UsageFrame {
    /// Lay out the rows visible in `state`'s window. Errors when the window holds no rows.
    pub fn build<Tz>(
        dataset: &Dataset,
        state: &ChartState,
        config: &ChartConfig,
        tz: &Tz,
    ) -> Result<Self>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let window = state.window();
        let visible = dataset.window_indices(&window);
        if visible.is_empty() {
            return Err(anyhow!("no data to plot"));
        }
        let selected = state.selected_index();

        let bars: Vec<Bar> = visible
            .clone()
            .filter_map(|i| {
                let row = dataset.get(i)?;
                let (start, end) = row.day_bounds(tz)?;
                let (s, e) = (start.timestamp() as f64, end.timestamp() as f64);
                let inset = (e - s) * BAR_INSET;
                Some(Bar {
                    x0: s + inset,
                    x1: e - inset,
                    active: row.active_users() as f64,
                    total: row.total_users as f64,
                    selected: selected == Some(i),
                })
            })
            .collect();
        if bars.is_empty() {
            return Err(anyhow!("no data to plot"));
        }

        let ticks: Vec<(f64, String)> = x_axis_date_values(config.tick_count, Some(&window), tz)
            .into_iter()
            .map(|t| (t.timestamp() as f64, t.format(TICK_LABEL_FORMAT).to_string()))
            .collect();

        let pad = |b: &Bar| (b.x1 - b.x0) * BAR_INSET / (1.0 - 2.0 * BAR_INSET);
        let first = bars[0];
        let last = bars[bars.len() - 1];
        let x_min = ticks
            .iter()
            .map(|(x, _)| *x)
            .fold((first.x0 - pad(&first)).min(window.start().timestamp() as f64), f64::min);
        let x_max = ticks
            .iter()
            .map(|(x, _)| *x)
            .fold((last.x1 + pad(&last)).max(window.end().timestamp() as f64), f64::max);

        let y_max = nice_axis_max(Dataset::max_total(&dataset.rows()[visible]));
        let readout = state
            .selected_row(dataset)
            .map(|row| readout_text(row, tz, &config.locale));

        Ok(Self {
            bars,
            ticks,
            x_min,
            x_max,
            y_max,
            readout,
        })
    }
}

/// Render the chart for `state`'s window to `out_path`.
///
/// `.svg` selects the SVG backend; any other extension is written as a bitmap.
pub fn plot_usage<P, Tz>(
    dataset: &Dataset,
    state: &ChartState,
    out_path: P,
    config: &ChartConfig,
    tz: &Tz,
) -> Result<()>
where
    P: AsRef<Path>,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let frame = UsageFrame::build(dataset, state, config, tz)?;
    ensure_fonts_registered();
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();
    let size = (config.width.max(200), config.height.max(200));

    if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(path_string.as_str(), size).into_drawing_area();
        draw_usage(root, &frame, config)?;
    } else {
        let root = BitMapBackend::new(path_string.as_str(), size).into_drawing_area();
        draw_usage(root, &frame, config)?;
    }
    log::debug!("wrote chart with {} bars to {}", frame.bars.len(), path_string);
    Ok(())
}

fn draw_usage<DB>(
    canvas: DrawingArea<DB, Shift>,
    frame: &UsageFrame,
    config: &ChartConfig,
) -> Result<()>
where
    DB: DrawingBackend,
{
    let locale = map_locale(&config.locale);

    canvas.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;
    let root = canvas
        .titled(config.title.trim(), (FontFamily::SansSerif, 24))
        .map_err(|e| anyhow!("{:?}", e))?;

    // ----------------------------
    // 1) Split drawing areas
    // ----------------------------
    let (readout_area, rest) = root.split_vertically(READOUT_BAND_PX);
    let rest_h = rest.dim_in_pixel().1 as i32;
    let (plot_area, legend_area_opt) = match config.legend {
        LegendMode::Bottom => {
            // keep at least 40px for plot area
            let (plot, legend) = rest.split_vertically((rest_h - LEGEND_BAND_PX as i32).max(40));
            (plot, Some(legend))
        }
        LegendMode::Inside => (rest, None),
    };

    let left_label_width_px = compute_left_label_area_px(frame.y_max, Y_LABELS, 12, locale);
    let axis_x_start_px = MARGIN + left_label_width_px as i32;

    // ----------------------------
    // 2) Readout for the selected row
    // ----------------------------
    if let Some(text) = &frame.readout {
        let (w, _) = readout_area.dim_in_pixel();
        let max_px = (w as i32 - axis_x_start_px - MARGIN).max(40) as u32;
        readout_area
            .draw(&Text::new(
                truncate_to_width(text, 16, max_px),
                (axis_x_start_px, READOUT_BAND_PX / 2),
                TextStyle::from((FontFamily::SansSerif, 16))
                    .pos(Pos::new(HPos::Left, VPos::Center)),
            ))
            .map_err(|e| anyhow!("{:?}", e))?;
    }

    // ----------------------------
    // 3) Build chart
    // ----------------------------
    let mut chart = ChartBuilder::on(&plot_area)
        .margin(MARGIN as u32)
        .set_label_area_size(LabelAreaPosition::Left, left_label_width_px)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .build_cartesian_2d(frame.x_min..frame.x_max, 0f64..frame.y_max)
        .map_err(|e| anyhow!("{:?}", e))?;

    // The x axis is drawn by hand so labels land on the sampled noon ticks.
    let y_label_fmt = |v: &f64| format_count(*v, locale);
    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_x_axis()
        .y_labels(Y_LABELS)
        .y_label_formatter(&y_label_fmt)
        .y_desc("Users")
        .label_style((FontFamily::SansSerif, 12))
        .axis_desc_style((FontFamily::SansSerif, 14))
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    chart
        .draw_series(std::iter::once(PathElement::new(
            vec![(frame.x_min, 0.0), (frame.x_max, 0.0)],
            BLACK,
        )))
        .map_err(|e| anyhow!("{:?}", e))?;

    // Tick marks sit below the plotting area, so they go onto the full canvas in backend pixels.
    let tick_style =
        TextStyle::from((FontFamily::SansSerif, 12)).pos(Pos::new(HPos::Center, VPos::Top));
    for (x, label) in &frame.ticks {
        let (px, py) = chart.backend_coord(&(*x, 0.0));
        canvas
            .draw(&PathElement::new(vec![(px, py), (px, py + TICK_MARK_PX)], BLACK))
            .map_err(|e| anyhow!("{:?}", e))?;
        canvas
            .draw(&Text::new(label.as_str(), (px, py + TICK_MARK_PX + 3), tick_style.clone()))
            .map_err(|e| anyhow!("{:?}", e))?;
    }

    // ----------------------------
    // 4) Bars, one series per user type
    // ----------------------------
    for user_type in UserType::ALL {
        let color = rgb_color(user_type.color());
        chart
            .draw_series(frame.bars.iter().map(|b| {
                let (lo, hi) = b.segment(user_type);
                Rectangle::new([(b.x0, lo), (b.x1, hi)], color.filled())
            }))
            .map_err(|e| anyhow!("{:?}", e))?
            .label(user_type.description())
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled())
            });
    }

    if let Some(b) = frame.bars.iter().find(|b| b.selected) {
        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(b.x0, 0.0), (b.x1, b.total)],
                BLACK.stroke_width(2),
            )))
            .map_err(|e| anyhow!("{:?}", e))?;
    }

    // ----------------------------
    // 5) Legend
    // ----------------------------
    if let Some(ref legend_area) = legend_area_opt {
        draw_legend_band(legend_area, &legend_items(), axis_x_start_px)?;
    } else {
        chart
            .configure_series_labels()
            .border_style(BLACK)
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.85))
            .label_font((FontFamily::SansSerif, 14))
            .draw()
            .map_err(|e| anyhow!("{:?}", e))?;
    }

    canvas.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}
