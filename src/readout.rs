//! Text shown for the row under the pointer.

use crate::models::Row;
use crate::viz::util::map_locale;
use chrono::TimeZone;
use num_format::ToFormattedString;

/// Format used for dates in readouts and axis labels.
pub const READOUT_DATE_FORMAT: &str = "%b %-d, %Y";

/// e.g. `Oct 15, 2024: 613 active, 47 new (660 total)`.
///
/// Counts use the thousands separator of `locale_tag` (see [`map_locale`]).
pub fn readout<Tz: TimeZone>(row: &Row, tz: &Tz, locale_tag: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let locale = map_locale(locale_tag);
    format!(
        "{}: {} active, {} new ({} total)",
        row.sample_date.with_timezone(tz).format(READOUT_DATE_FORMAT),
        row.active_users().to_formatted_string(locale),
        row.new_users.to_formatted_string(locale),
        row.total_users.to_formatted_string(locale),
    )
}
