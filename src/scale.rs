//! Linear mapping between a date window and a horizontal pixel span.

use crate::models::DateRange;
use crate::window::anchor_at;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    pub domain: DateRange,
    /// Pixel x of `domain.start()`.
    pub left: f64,
    /// Pixel width covered by the domain.
    pub width: f64,
}

impl TimeScale {
    pub fn new(domain: DateRange, left: f64, width: f64) -> Self {
        Self {
            domain,
            left,
            width,
        }
    }

    /// Position of pixel `x` within the span, clamped to [0, 1].
    pub fn fraction_at(&self, x: f64) -> f64 {
        if self.width <= 0.0 || !x.is_finite() {
            return 0.0;
        }
        ((x - self.left) / self.width).clamp(0.0, 1.0)
    }

    pub fn date_at(&self, x: f64) -> DateTime<Utc> {
        anchor_at(&self.domain, self.fraction_at(x))
    }

    /// Pixel x of `date`; dates outside the domain extrapolate linearly.
    pub fn x_of<Tz: chrono::TimeZone>(&self, date: &DateTime<Tz>) -> f64 {
        let span = self.domain.duration().num_milliseconds() as f64;
        if span <= 0.0 {
            return self.left;
        }
        let offset = (date.timestamp_millis() - self.domain.start().timestamp_millis()) as f64;
        self.left + self.width * offset / span
    }
}
