//! Calendar math for the check-in heatmap.
//!
//! Everything here is pure: day keys, day and week boundaries, and the
//! padded week grid that covers a trailing window ending at "today".
//! Weeks start on Sunday (weekday index 0).

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Days, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::KeyError;

/// Weekday row labels, Sunday first.
pub const WEEKDAY_LABELS: [&str; 7] = ["日", "一", "二", "三", "四", "五", "六"];

/// Default trailing window shown by the heatmap.
pub const DEFAULT_TOTAL_DAYS: i64 = 365;

/// First Sunday on or after 0000-01-01; grids never start earlier.
fn earliest_grid_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(0, 1, 2).unwrap_or(NaiveDate::MIN)
}

/// Canonical identifier of a local calendar day.
///
/// Renders as `YYYY-MM-DD`. Ordering follows the calendar, and for years
/// 0000 through 9999 (the range [`DayKey::from_str`] accepts) the string
/// form sorts the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayKey(NaiveDate);

impl DayKey {
    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// The key of the previous calendar day, if representable.
    pub fn pred(&self) -> Option<DayKey> {
        self.0.pred_opt().map(DayKey)
    }
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> Self {
        DayKey(date)
    }
}

impl From<NaiveDateTime> for DayKey {
    fn from(datetime: NaiveDateTime) -> Self {
        DayKey(datetime.date())
    }
}

impl<Tz: TimeZone> From<&DateTime<Tz>> for DayKey {
    /// Uses the calendar fields in the value's own offset; no UTC conversion.
    fn from(datetime: &DateTime<Tz>) -> Self {
        DayKey(datetime.date_naive())
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.0.year(),
            self.0.month(),
            self.0.day()
        )
    }
}

impl FromStr for DayKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        let shaped = bytes.len() == 10
            && bytes[4] == b'-'
            && bytes[7] == b'-'
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
        if !shaped {
            return Err(KeyError::Malformed(s.to_string()));
        }

        let year: i32 = s[0..4]
            .parse()
            .map_err(|_| KeyError::Malformed(s.to_string()))?;
        let month: u32 = s[5..7]
            .parse()
            .map_err(|_| KeyError::Malformed(s.to_string()))?;
        let day: u32 = s[8..10]
            .parse()
            .map_err(|_| KeyError::Malformed(s.to_string()))?;

        NaiveDate::from_ymd_opt(year, month, day)
            .map(DayKey)
            .ok_or_else(|| KeyError::InvalidDate(s.to_string()))
    }
}

impl Serialize for DayKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DayKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Map any local date or date-time to its day key.
pub fn day_key(date: impl Into<DayKey>) -> DayKey {
    date.into()
}

/// Today's date on the local calendar.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Truncate to local midnight of the same calendar day.
pub fn start_of_day(datetime: NaiveDateTime) -> NaiveDateTime {
    datetime.date().and_time(NaiveTime::MIN)
}

/// The most recent Sunday on or before `date`.
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_sunday();
    add_days(date, -i64::from(offset))
}

/// Shift `date` by `days` calendar days (negative goes back).
///
/// Saturates at the ends of chrono's representable range.
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    if days >= 0 {
        date.checked_add_days(Days::new(days.unsigned_abs()))
            .unwrap_or(NaiveDate::MAX)
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
            .unwrap_or(NaiveDate::MIN)
    }
}

/// One cell of the heatmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridDay {
    pub key: DayKey,
    /// Padding after the window's last day; rendered but not selectable.
    pub is_future: bool,
}

impl GridDay {
    pub fn date(&self) -> NaiveDate {
        self.key.date()
    }

    pub fn is_selectable(&self) -> bool {
        !self.is_future
    }
}

/// Seven consecutive days, Sunday first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Week {
    pub days: [GridDay; 7],
}

impl Week {
    pub fn first_day(&self) -> NaiveDate {
        self.days[0].date()
    }
}

/// Column header for a week: the month number when it changes, else blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthLabel {
    /// 1-indexed month of the week's first day.
    pub month: u32,
    pub label: String,
}

/// Padded calendar matrix covering a trailing window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekGrid {
    pub end: DayKey,
    pub weeks: Vec<Week>,
}

impl WeekGrid {
    pub fn days(&self) -> impl Iterator<Item = &GridDay> {
        self.weeks.iter().flat_map(|week| week.days.iter())
    }

    pub fn month_labels(&self) -> Vec<MonthLabel> {
        month_labels(&self.weeks)
    }
}

/// Build the week grid for the `total_days`-day window ending at `end_date`.
///
/// The window is left-padded back to Sunday and the last week is filled
/// with the days after `end_date`, which come back flagged as future.
/// `total_days <= 0` is treated as a one-day window. Windows reaching
/// back past Sunday 0000-01-02 are cut there, so every key in the grid
/// has a four-digit year.
pub fn build_week_grid(end_date: NaiveDate, total_days: i64) -> WeekGrid {
    let end = end_date;
    let max_days = end
        .signed_duration_since(earliest_grid_start())
        .num_days()
        .saturating_add(1)
        .max(1);
    let total_days = total_days.clamp(1, max_days);
    let start = add_days(end, -(total_days - 1));
    let grid_start = start_of_week(start);

    let span = end.signed_duration_since(grid_start).num_days() + 1;
    let week_count = (span + 6) / 7;

    let weeks = (0..week_count)
        .map(|index| {
            let first = add_days(grid_start, index * 7);
            Week {
                days: std::array::from_fn(|offset| {
                    let date = add_days(first, offset as i64);
                    GridDay {
                        key: DayKey(date),
                        is_future: date > end,
                    }
                }),
            }
        })
        .collect();

    WeekGrid {
        end: DayKey(end),
        weeks,
    }
}

/// One label per week; blank unless the month differs from the last label.
pub fn month_labels(weeks: &[Week]) -> Vec<MonthLabel> {
    let mut last_month = None;
    weeks
        .iter()
        .map(|week| {
            let month = week.first_day().month();
            let label = if last_month != Some(month) {
                last_month = Some(month);
                format!("{month}月")
            } else {
                String::new()
            };
            MonthLabel { month, label }
        })
        .collect()
}
