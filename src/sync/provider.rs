//! Time service providers: request URLs and reply formats.
//!
//! Two public services are supported:
//!
//! - **WorldTimeAPI** (no account): `GET {base}/timezone/{tz}` or `GET {base}/ip`,
//!   replying with an ISO-8601 `datetime` plus `dst`, `utc_offset` and `day_of_week`.
//! - **Adafruit IO** time integration (account key required):
//!   `GET {base}/{user}/integrations/time/struct/?x-aio-key={key}&tz={tz}`,
//!   replying with a broken-down struct
//!   `{"year":2021,"mon":1,"mday":2,"hour":17,"min":22,"sec":25,"wday":6,"yday":2,"isdst":0}`.

use serde::Deserialize;

use super::SyncError;
use crate::time::{LocalTime, UtcOffset, parse_time};

/// Where the time comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeProvider {
    WorldTimeApi {
        base_url: String,
    },
    AdafruitIo {
        base_url: String,
        username: String,
        key: String,
    },
}

/// Provider reply reduced to what the clock needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeReading {
    pub local_time: LocalTime,
    pub utc_offset: UtcOffset,
    /// 0 = Sunday.
    pub weekday: u8,
}

#[derive(Debug, Deserialize)]
struct WorldTimeResponse {
    datetime: String,
    dst: bool,
    utc_offset: String,
    day_of_week: u8,
}

#[derive(Debug, Deserialize)]
struct AdafruitTimeStruct {
    year: i32,
    mon: u32,
    mday: u32,
    hour: u32,
    min: u32,
    sec: u32,
    wday: u8,
    yday: u32,
    isdst: i8,
}

impl TimeProvider {
    pub fn name(&self) -> &'static str {
        match self {
            Self::WorldTimeApi { .. } => "worldtimeapi",
            Self::AdafruitIo { .. } => "adafruit_io",
        }
    }

    /// Request URL, by timezone name when given, otherwise by IP geolocation.
    pub fn request_url(&self, timezone: Option<&str>) -> String {
        match self {
            Self::WorldTimeApi { base_url } => {
                let base = base_url.trim_end_matches('/');
                match timezone {
                    Some(tz) => format!("{base}/timezone/{tz}"),
                    None => format!("{base}/ip"),
                }
            }
            Self::AdafruitIo {
                base_url,
                username,
                key,
            } => {
                let base = base_url.trim_end_matches('/');
                let url = format!("{base}/{username}/integrations/time/struct/?x-aio-key={key}");
                match timezone {
                    Some(tz) => format!("{url}&tz={tz}"),
                    None => url,
                }
            }
        }
    }

    /// Parse a reply body.
    pub fn parse_response(&self, body: &str) -> Result<TimeReading, SyncError> {
        match self {
            Self::WorldTimeApi { .. } => parse_worldtimeapi(body),
            Self::AdafruitIo { .. } => parse_adafruit_io(body),
        }
    }
}

fn check_weekday(weekday: u8) -> Result<u8, SyncError> {
    if weekday > 6 {
        return Err(SyncError::MalformedResponse(format!(
            "day of week {weekday} outside 0-6"
        )));
    }
    Ok(weekday)
}

fn parse_worldtimeapi(body: &str) -> Result<TimeReading, SyncError> {
    let reply: WorldTimeResponse = serde_json::from_str(body)
        .map_err(|e| SyncError::MalformedResponse(format!("worldtimeapi reply: {e}")))?;

    let weekday = check_weekday(reply.day_of_week)?;
    let local_time = parse_time(&reply.datetime, Some(reply.dst))?;

    Ok(TimeReading {
        local_time,
        utc_offset: UtcOffset::new(reply.utc_offset),
        weekday,
    })
}

fn parse_adafruit_io(body: &str) -> Result<TimeReading, SyncError> {
    let reply: AdafruitTimeStruct = serde_json::from_str(body)
        .map_err(|e| SyncError::MalformedResponse(format!("adafruit io reply: {e}")))?;

    let weekday = check_weekday(reply.wday)?;
    let is_dst = match reply.isdst {
        0 => Some(false),
        1.. => Some(true),
        _ => None,
    };
    let local_time = LocalTime::new(
        reply.year, reply.mon, reply.mday, reply.hour, reply.min, reply.sec,
    )
    .with_day_of_year(reply.yday)
    .with_dst(is_dst);

    if local_time.to_naive().is_none() {
        return Err(SyncError::MalformedTimestamp(format!(
            "adafruit io time out of range: {local_time}"
        )));
    }

    Ok(TimeReading {
        local_time,
        utc_offset: UtcOffset::unknown(),
        weekday,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adafruit() -> TimeProvider {
        TimeProvider::AdafruitIo {
            base_url: "https://io.adafruit.com/api/v2/".to_string(),
            username: "melissa".to_string(),
            key: "aio_secret".to_string(),
        }
    }

    #[test]
    fn test_worldtimeapi_urls() {
        let provider = TimeProvider::WorldTimeApi {
            base_url: "http://worldtimeapi.org/api/".to_string(),
        };
        assert_eq!(
            provider.request_url(Some("America/New_York")),
            "http://worldtimeapi.org/api/timezone/America/New_York"
        );
        assert_eq!(provider.request_url(None), "http://worldtimeapi.org/api/ip");
    }

    #[test]
    fn test_adafruit_urls() {
        assert_eq!(
            adafruit().request_url(Some("America/Chicago")),
            "https://io.adafruit.com/api/v2/melissa/integrations/time/struct/?x-aio-key=aio_secret&tz=America/Chicago"
        );
        assert!(!adafruit().request_url(None).contains("tz="));
    }

    #[test]
    fn test_parse_adafruit_struct() {
        let reading = adafruit()
            .parse_response(
                r#"{"year":2021,"mon":1,"mday":2,"hour":17,"min":22,"sec":25,"wday":6,"yday":2,"isdst":0}"#,
            )
            .unwrap();

        assert_eq!(reading.weekday, 6);
        assert_eq!(reading.local_time.day_of_year, Some(2));
        assert_eq!(reading.local_time.is_dst, Some(false));
        assert_eq!((reading.local_time.hour, reading.local_time.minute), (17, 22));
        assert_eq!(reading.utc_offset, UtcOffset::unknown());
    }

    #[test]
    fn test_parse_adafruit_unknown_dst() {
        let reading = adafruit()
            .parse_response(
                r#"{"year":2021,"mon":7,"mday":4,"hour":9,"min":0,"sec":0,"wday":0,"yday":185,"isdst":-1}"#,
            )
            .unwrap();
        assert_eq!(reading.local_time.is_dst, None);
    }

    #[test]
    fn test_rejects_weekday_out_of_range() {
        let provider = TimeProvider::WorldTimeApi {
            base_url: String::new(),
        };
        let result = provider.parse_response(
            r#"{"datetime":"2020-11-28T20:45:15-08:00","dst":false,"utc_offset":"-08:00","day_of_week":7}"#,
        );
        assert!(matches!(result, Err(SyncError::MalformedResponse(_))));
    }

    #[test]
    fn test_rejects_non_json() {
        let result = adafruit().parse_response("<html>rate limited</html>");
        assert!(matches!(result, Err(SyncError::MalformedResponse(_))));
    }
}
