//! Parsing of the ISO-8601-like timestamps returned by the time service.
//!
//! Accepted shape: `YYYY-MM-DDTHH:MM:SS[.ffffff][±HH:MM]`. The value is
//! already local time, so a trailing UTC offset is stripped and ignored, and
//! fractional seconds are truncated.

use super::LocalTime;
use crate::sync::SyncError;

/// Parse a local timestamp string.
///
/// Weekday and day of year cannot be derived from the string and are left
/// unset; callers attach the weekday reported alongside the timestamp.
///
/// # Errors
/// [`SyncError::MalformedTimestamp`] when the string lacks a `T` separated date
/// and time, either segment does not split into exactly three numbers, or the
/// numbers do not form a valid date and time.
pub fn parse_time(text: &str, is_dst: Option<bool>) -> Result<LocalTime, SyncError> {
    let malformed = |reason: &str| SyncError::MalformedTimestamp(format!("{reason}: '{text}'"));

    let (date, time) = text
        .trim()
        .split_once('T')
        .ok_or_else(|| malformed("missing 'T' between date and time"))?;

    let [year, month, day] = split_fields(date, '-').ok_or_else(|| malformed("bad date"))?;

    // Offset first ("+05:30" or "-08:00"), then fractional seconds.
    let clock = time.split('+').next().unwrap_or_default();
    let clock = clock.split('-').next().unwrap_or_default();
    let [hour, minute, second] = split_fields(clock, ':').ok_or_else(|| malformed("bad time"))?;
    let second = second.split('.').next().unwrap_or_default();

    let year = year.parse::<i32>().map_err(|_| malformed("bad year"))?;
    let number = |field: &str, name: &str| {
        field
            .parse::<u32>()
            .map_err(|_| malformed(&format!("bad {name}")))
    };

    let parsed = LocalTime::new(
        year,
        number(month, "month")?,
        number(day, "day")?,
        number(hour, "hour")?,
        number(minute, "minute")?,
        number(second, "second")?,
    )
    .with_dst(is_dst);

    if parsed.to_naive().is_none() {
        return Err(malformed("date or time out of range"));
    }

    Ok(parsed)
}

/// Split `segment` on `separator` into exactly three non-empty fields.
fn split_fields(segment: &str, separator: char) -> Option<[&str; 3]> {
    let mut parts = segment.split(separator);
    let fields = [parts.next()?, parts.next()?, parts.next()?];
    if parts.next().is_some() || fields.iter().any(|f| f.is_empty()) {
        return None;
    }
    Some(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::constants::test_constants::TEST_DATETIME;

    #[test]
    fn test_parse_full_timestamp() {
        let parsed = parse_time(TEST_DATETIME, Some(false)).unwrap();

        assert_eq!(parsed, LocalTime::new(2020, 11, 28, 20, 45, 15).with_dst(Some(false)));
        assert_eq!(parsed.weekday, None);
        assert_eq!(parsed.day_of_year, None);
    }

    #[test]
    fn test_parse_positive_offset() {
        let parsed = parse_time("2021-03-14T02:30:00.5+05:30", None).unwrap();
        assert_eq!((parsed.hour, parsed.minute, parsed.second), (2, 30, 0));
    }

    #[test]
    fn test_parse_without_offset_or_fraction() {
        let parsed = parse_time("2021-01-02T17:22:25", Some(true)).unwrap();
        assert_eq!(parsed, LocalTime::new(2021, 1, 2, 17, 22, 25).with_dst(Some(true)));
    }

    #[test]
    fn test_parse_utc_suffix_is_not_a_number() {
        // A trailing "Z" is not stripped and makes the seconds unparseable.
        assert!(matches!(
            parse_time("2021-01-02T17:22:25Z", None),
            Err(SyncError::MalformedTimestamp(_))
        ));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in [
            "",
            "2020-11-28",
            "2020-11-28 20:45:15",
            "2020-11T20:45:15",
            "2020-11-28-01T20:45:15",
            "2020-11-28T20:45",
            "2020-11-28T20:45:15:00",
            "2020-xx-28T20:45:15",
            "2020-11-28T20::15",
            "2020-13-28T20:45:15",
            "2020-11-28T25:45:15",
        ] {
            let result = parse_time(bad, None);
            assert!(
                matches!(result, Err(SyncError::MalformedTimestamp(_))),
                "expected '{bad}' to be rejected, got {result:?}"
            );
        }
    }
}
