use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime, Timelike};
use std::cmp::Ordering;

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Source of the current local wall-clock time
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Clock backed by the system's local time
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Snapshot of "now": the local calendar date plus minutes since local midnight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Now {
    pub date: NaiveDate,
    pub minutes: u32,
}

impl Now {
    pub fn from_datetime(datetime: NaiveDateTime) -> Self {
        Self {
            date: datetime.date(),
            minutes: datetime.hour() * 60 + datetime.minute(),
        }
    }

    /// Read the current moment from a clock
    pub fn read(clock: &dyn Clock) -> Self {
        Self::from_datetime(clock.now())
    }

    /// Current hour of the day (0-23)
    pub fn hour(&self) -> u32 {
        self.minutes / 60
    }
}

/// Today's local date
pub fn today(clock: &dyn Clock) -> NaiveDate {
    clock.now().date()
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_iso_date(iso: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(iso.trim(), "%Y-%m-%d").ok()
}

/// Format a date as `YYYY-MM-DD`
pub fn format_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Short `MM-DD` label used by the weekly series
pub fn month_day_label(date: NaiveDate) -> String {
    date.format("%m-%d").to_string()
}

/// Calendar date `delta_days` away from `date` (negative = past)
pub fn shift_date(date: NaiveDate, delta_days: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(delta_days))
        .unwrap_or(if delta_days < 0 {
            NaiveDate::MIN
        } else {
            NaiveDate::MAX
        })
}

/// Signed day count from `a` to `b` (negative when `b` precedes `a`)
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    b.signed_duration_since(a).num_days()
}

/// Parse `HH:MM` into minutes since midnight
///
/// Both components must be unsigned integers with the hour in 0-23 and the
/// minute in 0-59. Returns `None` for anything else.
pub fn time_to_minutes(hhmm: &str) -> Option<u32> {
    let (hours, minutes) = hhmm.trim().split_once(':')?;
    let hours: u32 = hours.trim().parse().ok()?;
    let minutes: u32 = minutes.trim().parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some(hours * 60 + minutes)
}

/// Three-way comparison of two `HH:MM` times by minute value
///
/// Unparseable inputs compare as equal.
pub fn compare_times(a: &str, b: &str) -> Ordering {
    match (time_to_minutes(a), time_to_minutes(b)) {
        (Some(ma), Some(mb)) => ma.cmp(&mb),
        _ => Ordering::Equal,
    }
}

/// Zero-based month index (0 = January)
pub fn month_index(date: NaiveDate) -> usize {
    date.month0() as usize
}

pub fn year(date: NaiveDate) -> i32 {
    date.year()
}

/// Three-letter month name, or an empty string for an out-of-range index
pub fn month_name(index: usize) -> &'static str {
    MONTH_NAMES.get(index).copied().unwrap_or("")
}

#[cfg(test)]
pub use test_clock::FixedClock;


#[cfg(test)]
impl Now {
    /// Build from `YYYY-MM-DD` and `HH:MM`
    pub fn at(date: &str, time: &str) -> Self {
        Self::read(&FixedClock::at(date, time))
    }
}
