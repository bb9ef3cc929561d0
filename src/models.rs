use chrono::{DateTime, NaiveDate, TimeDelta, TimeZone, Utc};
use thiserror::Error;

/// Raised when a `DateRange` would have its start after its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("range start {start} is after range end {end}")]
pub struct RangeError {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Closed interval `[start, end]` of instants. `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, RangeError> {
        if start > end {
            return Err(RangeError { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    pub fn half_width(&self) -> TimeDelta {
        self.duration() / 2
    }

    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        self.start <= *instant && *instant <= self.end
    }

    /// `true` when `other` lies entirely inside `self`.
    pub fn encloses(&self, other: &DateRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Clamp an instant into the range.
    pub fn clamp(&self, instant: DateTime<Utc>) -> DateTime<Utc> {
        instant.clamp(self.start, self.end)
    }

    /// Whole calendar days elapsed from `start` to `end` on the wall clock of `tz`:
    /// the largest `n` such that `start` plus `n` local days is not after `end`.
    pub fn day_span<Tz: TimeZone>(&self, tz: &Tz) -> i64 {
        let from = self.start.with_timezone(tz).naive_local();
        let to = self.end.with_timezone(tz).naive_local();
        let days = (to.date() - from.date()).num_days();
        let days = if to.time() < from.time() { days - 1 } else { days };
        days.max(0)
    }

    /// First and last calendar day covered by the range in `tz`.
    pub fn local_days<Tz: TimeZone>(&self, tz: &Tz) -> (NaiveDate, NaiveDate) {
        (
            self.start.with_timezone(tz).date_naive(),
            self.end.with_timezone(tz).date_naive(),
        )
    }
}

/// Plain RGB color, converted to a backend color at draw time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// The two kinds of user that make up one bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserType {
    /// Users that have signed in at least once.
    Active,
    /// Users that have never completed their first sign-in.
    New,
}

impl UserType {
    /// Stacking order: earlier entries sit below later ones.
    pub const ALL: [UserType; 2] = [UserType::Active, UserType::New];

    pub fn description(&self) -> &'static str {
        match self {
            UserType::Active => "Active Users",
            UserType::New => "New Users",
        }
    }

    pub fn color(&self) -> Rgb8 {
        match self {
            UserType::Active => Rgb8 { r: 52, g: 199, b: 89 },
            UserType::New => Rgb8 { r: 0, g: 122, b: 255 },
        }
    }
}

/// One segment of a stacked bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlottableUserType {
    pub user_type: UserType,
    pub value: u32,
}

impl PlottableUserType {
    pub fn description(&self) -> &'static str {
        self.user_type.description()
    }

    pub fn color(&self) -> Rgb8 {
        self.user_type.color()
    }
}

/// One legend entry: a unique description and its swatch color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegendElement {
    pub description: &'static str,
    pub color: Rgb8,
}

/// Legend in stacking order (active first, new second).
pub fn legend() -> [LegendElement; 2] {
    UserType::ALL.map(|t| LegendElement {
        description: t.description(),
        color: t.color(),
    })
}

/// One daily sample of registered users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Row {
    pub sample_date: DateTime<Utc>,
    pub total_users: u32,
    /// Included in `total_users`.
    pub new_users: u32,
}

impl Row {
    pub fn new(sample_date: DateTime<Utc>, total_users: u32, new_users: u32) -> Self {
        Self {
            sample_date,
            total_users,
            new_users,
        }
    }

    pub fn active_users(&self) -> u32 {
        self.total_users.saturating_sub(self.new_users)
    }

    /// Bar segments, bottom to top.
    pub fn user_types(&self) -> [PlottableUserType; 2] {
        UserType::ALL.map(|user_type| PlottableUserType {
            user_type,
            value: match user_type {
                UserType::Active => self.active_users(),
                UserType::New => self.new_users,
            },
        })
    }

    /// Local midnight-to-midnight extent of the day this sample belongs to.
    /// A bar drawn over this span is centered on the day's noon tick.
    pub fn day_bounds<Tz: TimeZone>(&self, tz: &Tz) -> Option<(DateTime<Tz>, DateTime<Tz>)> {
        let day = self.sample_date.with_timezone(tz).date_naive();
        let next = day.succ_opt()?;
        let start = tz.from_local_datetime(&day.and_hms_opt(0, 0, 0)?).earliest()?;
        let end = tz.from_local_datetime(&next.and_hms_opt(0, 0, 0)?).earliest()?;
        Some((start, end))
    }
}
