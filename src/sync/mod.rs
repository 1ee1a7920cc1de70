//! Time synchronization against a network time service.
//!
//! [`TimeSyncService::sync`] performs one complete attempt: build the request
//! URL for the configured provider, fetch it through the injected
//! [`TimeFetcher`], parse the reply, and derive the garbage day state from the
//! reported weekday and the parsed hour and minute. Failures are returned as a
//! [`SyncError`] and never handled here; the clock controller decides when to
//! retry.

pub mod demo;
pub mod fetch;
pub mod provider;

pub use demo::DemoFetcher;
pub use fetch::{HttpFetcher, TimeFetcher};
pub use provider::{TimeProvider, TimeReading};

use std::fmt;

use crate::core::garbage_day::{self, GarbageDayState};
use crate::time::{LocalTime, UtcOffset};

/// Why a sync attempt failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// The request could not be sent, timed out, or returned an error status.
    NetworkFailure(String),
    /// The reply arrived but did not have the expected shape.
    MalformedResponse(String),
    /// The timestamp in the reply could not be parsed.
    MalformedTimestamp(String),
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NetworkFailure(detail) => write!(f, "network failure: {detail}"),
            Self::MalformedResponse(detail) => write!(f, "malformed response: {detail}"),
            Self::MalformedTimestamp(detail) => write!(f, "malformed timestamp: {detail}"),
        }
    }
}

impl std::error::Error for SyncError {}

/// Everything a successful sync produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncedTime {
    pub local_time: LocalTime,
    pub utc_offset: UtcOffset,
    pub weekday: u8,
    pub garbage: GarbageDayState,
}

/// One-shot synchronization against a [`TimeProvider`].
pub struct TimeSyncService {
    provider: TimeProvider,
    timezone: Option<String>,
    fetcher: Box<dyn TimeFetcher>,
}

impl TimeSyncService {
    /// `timezone` is an IANA name such as `"America/New_York"`; `None` lets the
    /// provider locate the board by IP address.
    pub fn new(
        provider: TimeProvider,
        timezone: Option<String>,
        fetcher: Box<dyn TimeFetcher>,
    ) -> Self {
        Self {
            provider,
            timezone,
            fetcher,
        }
    }

    pub fn provider(&self) -> &TimeProvider {
        &self.provider
    }

    pub fn timezone(&self) -> Option<&str> {
        self.timezone.as_deref()
    }

    /// URL requested by the next [`sync`](Self::sync).
    pub fn request_url(&self) -> String {
        self.provider.request_url(self.timezone.as_deref())
    }

    /// Fetch the current time and derive the garbage day state.
    pub fn sync(&mut self) -> Result<SyncedTime, SyncError> {
        let url = self.request_url();
        let body = self
            .fetcher
            .fetch(&url)
            .map_err(|e| SyncError::NetworkFailure(format!("{e:#}")))?;

        let TimeReading {
            local_time,
            utc_offset,
            weekday,
        } = self.provider.parse_response(&body)?;

        Ok(SyncedTime {
            local_time: local_time.with_weekday(weekday),
            garbage: garbage_day::evaluate(weekday, local_time.hour, local_time.minute),
            utc_offset,
            weekday,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::fetch::MockTimeFetcher;
    use super::*;
    use crate::common::constants::test_constants::*;
    use crate::core::garbage_day::GarbageColor;

    fn worldtimeapi() -> TimeProvider {
        TimeProvider::WorldTimeApi {
            base_url: "http://worldtimeapi.org/api".to_string(),
        }
    }

    fn service_returning(body: &'static str) -> TimeSyncService {
        let mut fetcher = MockTimeFetcher::new();
        fetcher
            .expect_fetch()
            .withf(|url| url.to_string() == "http://worldtimeapi.org/api/timezone/America/Los_Angeles")
            .times(1)
            .returning(move |_| Ok(body.to_string()));
        TimeSyncService::new(
            worldtimeapi(),
            Some(TEST_TIMEZONE.to_string()),
            Box::new(fetcher),
        )
    }

    #[test]
    fn test_sync_success() {
        let mut service = service_returning(
            r#"{"datetime":"2020-11-28T20:45:15.813019-08:00","dst":false,"utc_offset":"-08:00","day_of_week":6}"#,
        );

        let synced = service.sync().unwrap();

        assert_eq!(
            synced.local_time,
            LocalTime::new(2020, 11, 28, 20, 45, 15)
                .with_dst(Some(false))
                .with_weekday(TEST_WEEKDAY)
        );
        assert_eq!(synced.utc_offset.as_str(), TEST_UTC_OFFSET);
        assert_eq!(synced.weekday, 6);
        assert_eq!(synced.garbage.label, "4 days");
        assert_eq!(synced.garbage.color, GarbageColor::Green);
    }

    #[test]
    fn test_sync_uses_parsed_hour_for_rule() {
        let mut service = service_returning(
            r#"{"datetime":"2020-11-24T19:00:01-08:00","dst":false,"utc_offset":"-08:00","day_of_week":2}"#,
        );
        assert_eq!(service.sync().unwrap().garbage.label, "NOW");
    }

    #[test]
    fn test_sync_network_failure() {
        let mut fetcher = MockTimeFetcher::new();
        fetcher
            .expect_fetch()
            .returning(|_| Err(anyhow::anyhow!("connection refused")));
        let mut service = TimeSyncService::new(worldtimeapi(), None, Box::new(fetcher));

        match service.sync() {
            Err(SyncError::NetworkFailure(detail)) => assert!(detail.contains("connection refused")),
            other => panic!("expected network failure, got {other:?}"),
        }
    }

    #[test]
    fn test_sync_ip_geolocation_url() {
        let mut fetcher = MockTimeFetcher::new();
        fetcher
            .expect_fetch()
            .withf(|url| url.to_string() == "http://worldtimeapi.org/api/ip")
            .returning(|_| Err(anyhow::anyhow!("offline")));
        let mut service = TimeSyncService::new(worldtimeapi(), None, Box::new(fetcher));

        assert!(service.sync().is_err());
        assert_eq!(service.timezone(), None);
    }

    #[test]
    fn test_sync_malformed_response() {
        let mut service = service_returning(r#"{"unixtime": 1606625115}"#);
        assert!(matches!(service.sync(), Err(SyncError::MalformedResponse(_))));
    }

    #[test]
    fn test_sync_malformed_timestamp() {
        let mut service = service_returning(
            r#"{"datetime":"yesterday","dst":false,"utc_offset":"-08:00","day_of_week":6}"#,
        );
        assert!(matches!(service.sync(), Err(SyncError::MalformedTimestamp(_))));
    }

    #[test]
    fn test_error_display() {
        let error = SyncError::NetworkFailure("timed out".to_string());
        assert_eq!(error.to_string(), "network failure: timed out");
    }
}
