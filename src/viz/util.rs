//! Utility functions for visualization: colors, locale mapping, value-axis sizing.

use crate::models::Rgb8;
use num_format::{Locale, ToFormattedString};
use plotters::prelude::*;

use super::text::estimate_text_width_px;

/// Convert a model color to a plotters color.
#[inline]
pub fn rgb_color(c: Rgb8) -> RGBColor {
    RGBColor(c.r, c.g, c.b)
}

/// Map a user-provided locale tag to a `num_format::Locale`.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`, `german`,
/// `fr`, `es`, `it`, `pt`, `nl`. Defaults to English.
pub fn map_locale(tag: &str) -> &'static Locale {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => &Locale::de,
        "fr" | "fr_fr" => &Locale::fr,
        "es" | "es_es" => &Locale::es,
        "it" | "it_it" => &Locale::it,
        "pt" | "pt_pt" | "pt_br" => &Locale::pt,
        "nl" | "nl_nl" => &Locale::nl,
        _ => &Locale::en, // default
    }
}

/// Whole-number axis label with locale thousands separators.
pub fn format_count(v: f64, locale: &Locale) -> String {
    if !v.is_finite() || v <= 0.0 {
        return "0".to_string();
    }
    (v.round() as u64).to_formatted_string(locale)
}

/// Top of the value axis: the largest bar plus ~10% headroom, rounded up to
/// a "nice" step (1, 2 or 5 times a power of ten).
pub fn nice_axis_max(max_total: u32) -> f64 {
    if max_total == 0 {
        return 1.0;
    }
    let target = max_total as f64 * 1.1;
    let magnitude = 10f64.powf(target.log10().floor());
    let step = [1.0, 2.0, 5.0, 10.0]
        .into_iter()
        .map(|m| m * magnitude / 10.0)
        .find(|s| (target / s).ceil() <= 10.0)
        .unwrap_or(magnitude);
    (target / step).ceil() * step
}

/// Width in pixels of the left label area, from the widest value label that will appear.
pub fn compute_left_label_area_px(
    y_max: f64,
    ticks: usize,
    font_px: u32,
    locale: &Locale,
) -> u32 {
    let mut max_px = 0u32;
    for i in 0..=ticks {
        let t = if ticks == 0 {
            0.0
        } else {
            i as f64 / ticks as f64
        };
        let s = format_count(y_max * t, locale);
        max_px = max_px.max(estimate_text_width_px(&s, font_px));
    }
    // tick marks plus breathing room
    max_px.saturating_add(18).clamp(48, 140)
}
