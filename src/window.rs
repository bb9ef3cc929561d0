//! Zoom arithmetic for the visible date window.

use crate::models::DateRange;
use chrono::{DateTime, TimeDelta, Utc};

/// Narrowest half-width a zoom can produce.
pub const MIN_HALF_WIDTH: TimeDelta = TimeDelta::days(2);

/// Applied to the base half-width so that the first perceptible pinch
/// already narrows the window instead of doing nothing.
pub const OVERSHOOT: f64 = 1.2;

/// Half-width of the zoomed window, before clamping to the total range.
///
/// `max(MIN_HALF_WIDTH, base.half_width() * OVERSHOOT / magnification)`.
/// A non-positive or non-finite magnification leaves the base half-width unchanged.
pub fn zoom_half_width(base: &DateRange, magnification: f64) -> TimeDelta {
    if !(magnification.is_finite() && magnification > 0.0) {
        return base.half_width();
    }
    let ms = base.half_width().num_milliseconds() as f64 * OVERSHOOT / magnification;
    let min_ms = MIN_HALF_WIDTH.num_milliseconds() as f64;
    // i64 milliseconds cover ~292 million years; anything wider clamps away anyway
    let ms = ms.max(min_ms).min(i64::MAX as f64 / 4.0);
    TimeDelta::milliseconds(ms.round() as i64)
}

/// Zoom around a point of `base`, keeping the result inside `total`.
///
/// `anchor_fraction` is the horizontal gesture position (0 = left edge,
/// 1 = right edge) mapped onto `base`. The new window is centered on that
/// anchor with [`zoom_half_width`] on each side, then each bound is clamped
/// into `total`.
pub fn zoom(
    anchor_fraction: f64,
    magnification: f64,
    base: &DateRange,
    total: &DateRange,
) -> DateRange {
    if !(magnification.is_finite() && magnification > 0.0) {
        return clamp_range(base, total);
    }
    let anchor = total.clamp(anchor_at(base, anchor_fraction));
    let half = zoom_half_width(base, magnification).min(total.duration());

    let start = anchor
        .checked_sub_signed(half)
        .map_or(total.start(), |s| s.max(total.start()));
    let end = anchor
        .checked_add_signed(half)
        .map_or(total.end(), |e| e.min(total.end()));
    // anchor is inside `total`, so start <= anchor <= end
    DateRange::new(start, end).unwrap_or(*total)
}

/// Instant at `fraction` of the way through `range`. Fractions outside [0, 1] are clamped.
pub fn anchor_at(range: &DateRange, fraction: f64) -> DateTime<Utc> {
    let f = if fraction.is_finite() {
        fraction.clamp(0.0, 1.0)
    } else {
        0.5
    };
    let offset = (range.duration().num_milliseconds() as f64 * f).round() as i64;
    range.start() + TimeDelta::milliseconds(offset)
}

/// Intersect `range` with `total`, falling back to `total` when they are disjoint.
pub fn clamp_range(range: &DateRange, total: &DateRange) -> DateRange {
    let start = range.start().max(total.start());
    let end = range.end().min(total.end());
    DateRange::new(start, end).unwrap_or(*total)
}
