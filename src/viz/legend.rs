//! Legend band drawn under the chart.

use anyhow::Result;
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::text::estimate_text_width_px;
use super::util::rgb_color;
use crate::models::LegendElement;

/// Height of the bottom legend band, in pixels.
pub const LEGEND_BAND_PX: u32 = 40;

/// Draw `items` left to right as square swatches followed by their labels.
/// The first swatch starts at `axis_x_start_px` so the legend lines up with the plot.
pub fn draw_legend_band<DB: DrawingBackend>(
    legend_area: &DrawingArea<DB, Shift>,
    items: &[LegendElement],
    axis_x_start_px: i32,
) -> Result<()> {
    legend_area
        .fill(&WHITE)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    let (_, h_u32) = legend_area.dim_in_pixel();
    let center_y = h_u32 as i32 / 2;

    let font_px: u32 = 14;
    let swatch: i32 = 10;
    let swatch_to_text_gap: i32 = 8;
    let trailing_gap: i32 = 24;
    let label_style: TextStyle =
        TextStyle::from((FontFamily::SansSerif, font_px)).pos(Pos::new(HPos::Left, VPos::Center));

    let mut x = axis_x_start_px;
    for item in items {
        legend_area
            .draw(&Rectangle::new(
                [(x, center_y - swatch / 2), (x + swatch, center_y + swatch / 2)],
                rgb_color(item.color).filled(),
            ))
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        let text_x = x + swatch + swatch_to_text_gap;
        legend_area
            .draw(&Text::new(
                item.description,
                (text_x, center_y),
                label_style.clone(),
            ))
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        x = text_x + estimate_text_width_px(item.description, font_px) as i32 + trailing_gap;
    }
    Ok(())
}
