//! Wall-clock time values and the clock the board keeps.
//!
//! The board has no notion of time zones: [`LocalTime`] is always the local
//! wall-clock reading delivered by the time service, and the UTC offset that
//! comes with it is carried along as an opaque [`UtcOffset`] token only.

pub mod clock;
pub mod parse;

pub use clock::{Clock, SimulatedClock, SystemClock};
pub use parse::parse_time;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use std::fmt;

/// A broken-down local wall-clock time.
///
/// `weekday` counts from Sunday (0) to Saturday (6). `weekday` and
/// `day_of_year` are `None` when the source could not provide them, and
/// `is_dst` is `None` when daylight saving is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub weekday: Option<u8>,
    pub day_of_year: Option<u32>,
    pub is_dst: Option<bool>,
}

impl LocalTime {
    /// Build a time from its calendar fields, leaving weekday, day of year and DST unset.
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            weekday: None,
            day_of_year: None,
            is_dst: None,
        }
    }

    /// Convert a chrono reading, deriving weekday and day of year from the date.
    pub fn from_naive(datetime: NaiveDateTime) -> Self {
        Self {
            year: datetime.year(),
            month: datetime.month(),
            day: datetime.day(),
            hour: datetime.hour(),
            minute: datetime.minute(),
            second: datetime.second(),
            weekday: Some(datetime.weekday().num_days_from_sunday() as u8),
            day_of_year: Some(datetime.ordinal()),
            is_dst: None,
        }
    }

    /// The same time with the weekday supplied out-of-band.
    pub fn with_weekday(mut self, weekday: u8) -> Self {
        self.weekday = Some(weekday);
        self
    }

    pub fn with_day_of_year(mut self, day_of_year: u32) -> Self {
        self.day_of_year = Some(day_of_year);
        self
    }

    pub fn with_dst(mut self, is_dst: Option<bool>) -> Self {
        self.is_dst = is_dst;
        self
    }

    /// The chrono equivalent, or `None` if the fields do not form a valid date and time.
    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)?.and_hms_opt(
            self.hour,
            self.minute,
            self.second,
        )
    }

    /// Seconds since the epoch, treating the wall-clock reading as if it were UTC.
    ///
    /// This matches how the board's real-time clock counts: it is set to local
    /// time and has no zone, so differences between two epochs are exact while
    /// the absolute value is shifted by the UTC offset.
    pub fn epoch(&self) -> Option<i64> {
        self.to_naive().map(|naive| naive.and_utc().timestamp())
    }
}

impl fmt::Display for LocalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// UTC offset token reported by the time service, e.g. `"-08:00"`.
///
/// Never applied to a [`LocalTime`]; kept for display and logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UtcOffset(String);

impl UtcOffset {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Placeholder used when the offset is not known.
    pub fn unknown() -> Self {
        Self::new("+00:00")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UtcOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_naive_derives_weekday_and_ordinal() {
        let naive = NaiveDate::from_ymd_opt(2020, 11, 28)
            .unwrap()
            .and_hms_opt(20, 45, 15)
            .unwrap();
        let time = LocalTime::from_naive(naive);

        assert_eq!(time.weekday, Some(6)); // Saturday
        assert_eq!(time.day_of_year, Some(333));
        assert_eq!(time.is_dst, None);
        assert_eq!(time.to_naive(), Some(naive));
    }

    #[test]
    fn test_invalid_fields_have_no_epoch() {
        assert_eq!(LocalTime::new(2021, 2, 30, 0, 0, 0).epoch(), None);
        assert_eq!(LocalTime::new(2021, 1, 1, 24, 0, 0).epoch(), None);
    }

    #[test]
    fn test_epoch_differences_are_wall_clock_seconds() {
        let a = LocalTime::new(2021, 1, 2, 17, 22, 25).epoch().unwrap();
        let b = LocalTime::new(2021, 1, 2, 17, 23, 25).epoch().unwrap();
        assert_eq!(b - a, 60);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            LocalTime::new(2020, 1, 5, 7, 3, 9).to_string(),
            "2020-01-05 07:03:09"
        );
        assert_eq!(UtcOffset::unknown().to_string(), "+00:00");
    }
}
