use std::fmt;

use serde::{Deserialize, Serialize};

const DAY_BITS: u32 = 9;
const DAY_MASK: u32 = (1 << DAY_BITS) - 1;

pub const DAYS_PER_YEAR: u32 = 360;
pub const MONTHS_PER_YEAR: u32 = 12;
pub const DAYS_PER_MONTH: u32 = 30;

/// In-scenario calendar date: twelve 30-day months per year.
///
/// Bit layout: `[year:23][day_of_year:9]`. Natural `u32` ordering equals
/// chronological ordering.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "DateRepr", from = "DateRepr")]
pub struct GameDate(u32);

#[derive(Serialize, Deserialize)]
struct DateRepr {
    year: u32,
    day: u32,
}

impl From<GameDate> for DateRepr {
    fn from(date: GameDate) -> Self {
        DateRepr {
            year: date.year(),
            day: date.day(),
        }
    }
}

impl From<DateRepr> for GameDate {
    fn from(repr: DateRepr) -> Self {
        GameDate::new(repr.year, repr.day)
    }
}

impl GameDate {
    /// Create a date from year and day-of-year (1–360).
    pub fn new(year: u32, day: u32) -> Self {
        assert!(
            (1..=DAYS_PER_YEAR).contains(&day),
            "day out of range: {day}"
        );
        Self((year << DAY_BITS) | day)
    }

    pub fn from_year(year: u32) -> Self {
        Self::new(year, 1)
    }

    /// First day of the given month (1–12).
    pub fn from_year_month(year: u32, month: u32) -> Self {
        debug_assert!(
            (1..=MONTHS_PER_YEAR).contains(&month),
            "month out of range: {month}"
        );
        Self::new(year, (month - 1) * DAYS_PER_MONTH + 1)
    }

    pub fn year(self) -> u32 {
        self.0 >> DAY_BITS
    }

    pub fn day(self) -> u32 {
        self.0 & DAY_MASK
    }

    /// Month of year (1–12).
    pub fn month(self) -> u32 {
        (self.day() - 1) / DAYS_PER_MONTH + 1
    }

    /// Day within the month (1–30).
    pub fn day_of_month(self) -> u32 {
        (self.day() - 1) % DAYS_PER_MONTH + 1
    }

    pub fn is_month_start(self) -> bool {
        self.day_of_month() == 1
    }

    /// The following day, rolling over into the next year after day 360.
    pub fn next_day(self) -> Self {
        if self.day() == DAYS_PER_YEAR {
            Self::new(self.year() + 1, 1)
        } else {
            Self::new(self.year(), self.day() + 1)
        }
    }
}

impl Default for GameDate {
    fn default() -> Self {
        Self::from_year(0)
    }
}

impl fmt::Display for GameDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{:02}-{:02}",
            self.year(),
            self.month(),
            self.day_of_month()
        )
    }
}
