//! Decides when to resynchronize and what to do with the outcome.
//!
//! The controller owns the most recent [`SyncState`] and is the single place
//! where a [`SyncError`](crate::sync::SyncError) is recovered from:
//!
//! - **NeverSynced**: every tick attempts a sync. A failure installs a fallback
//!   state read from the board clock with an unknown weekday and a grey `???`
//!   garbage label, and stamps it with the attempt time so the next attempt
//!   waits a full interval.
//! - **Synced / SyncFailed**: a sync is attempted only once more than the
//!   resync interval has passed since `last_sync_epoch`. A failure keeps the
//!   previous state and pushes `last_sync_epoch` forward by the retry backoff.
//!
//! After any attempt the tick reports [`TickOutcome::Refreshed`] so the
//! caller re-reads the clock before drawing.

use std::time::Duration;

use crate::config::Config;
use crate::core::garbage_day::{GarbageDayState, weekday_abbreviation};
use crate::sync::TimeSyncService;
use crate::time::{Clock, LocalTime, UtcOffset};

/// Result of the most recent sync, or the fallback used before the first success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncState {
    /// Clock epoch the next resync is measured from.
    pub last_sync_epoch: i64,
    pub local_time: LocalTime,
    pub utc_offset: UtcOffset,
    /// `None` until a sync has reported the day of week.
    pub weekday: Option<u8>,
    pub garbage: GarbageDayState,
}

impl SyncState {
    fn fallback(now: i64, local_time: LocalTime) -> Self {
        Self {
            last_sync_epoch: now,
            local_time,
            utc_offset: UtcOffset::unknown(),
            weekday: None,
            garbage: GarbageDayState::unknown(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClockState {
    NeverSynced,
    Synced(SyncState),
    /// Last known state and the number of consecutive failures.
    SyncFailed(SyncState, u32),
}

/// State kind without its payload, for logging and assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockStatus {
    NeverSynced,
    Synced,
    SyncFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No sync was due.
    Idle,
    /// A sync was attempted; the clock may have changed.
    Refreshed,
}

pub struct ClockController {
    state: ClockState,
    resync_interval: i64,
    retry_backoff: i64,
}

impl ClockController {
    pub fn new(resync_interval: Duration, retry_backoff: Duration) -> Self {
        Self {
            state: ClockState::NeverSynced,
            resync_interval: resync_interval.as_secs() as i64,
            retry_backoff: retry_backoff.as_secs() as i64,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.resync_interval(), config.retry_backoff())
    }

    pub fn state(&self) -> &ClockState {
        &self.state
    }

    pub fn status(&self) -> ClockStatus {
        match self.state {
            ClockState::NeverSynced => ClockStatus::NeverSynced,
            ClockState::Synced(_) => ClockStatus::Synced,
            ClockState::SyncFailed(..) => ClockStatus::SyncFailed,
        }
    }

    /// Current sync state, including the fallback after a failed first sync.
    pub fn sync_state(&self) -> Option<&SyncState> {
        match &self.state {
            ClockState::NeverSynced => None,
            ClockState::Synced(state) | ClockState::SyncFailed(state, _) => Some(state),
        }
    }

    /// Consecutive failed attempts, zero while synced.
    pub fn fail_count(&self) -> u32 {
        match self.state {
            ClockState::SyncFailed(_, count) => count,
            _ => 0,
        }
    }

    /// Whether a sync attempt is due at `now`.
    pub fn is_due(&self, now: i64) -> bool {
        match self.sync_state() {
            None => true,
            Some(state) => now - state.last_sync_epoch > self.resync_interval,
        }
    }

    /// Attempt a sync if one is due.
    pub fn tick<C>(&mut self, now: i64, service: &mut TimeSyncService, clock: &mut C) -> TickOutcome
    where
        C: Clock + ?Sized,
    {
        if !self.is_due(now) {
            return TickOutcome::Idle;
        }

        let previous = std::mem::replace(&mut self.state, ClockState::NeverSynced);
        self.state = match service.sync() {
            Ok(synced) => {
                clock.set_local(synced.local_time);
                let state = SyncState {
                    last_sync_epoch: clock.epoch(),
                    local_time: synced.local_time,
                    utc_offset: synced.utc_offset,
                    weekday: Some(synced.weekday),
                    garbage: synced.garbage,
                };

                log_block_start!(
                    "Time synchronized: {} ({})",
                    state.local_time,
                    state.utc_offset
                );
                log_indented!(
                    "{}, garbage day: {}",
                    weekday_abbreviation(state.weekday),
                    state.garbage.label
                );
                ClockState::Synced(state)
            }
            Err(e) => {
                log_block_start!("Time sync with {} failed: {}", service.provider().name(), e);
                match previous {
                    ClockState::NeverSynced => {
                        log_indented!("Using board clock until the next attempt");
                        ClockState::SyncFailed(SyncState::fallback(now, clock.local_now()), 1)
                    }
                    ClockState::Synced(mut state) => {
                        state.last_sync_epoch += self.retry_backoff;
                        log_indented!("Keeping last synced time, next attempt pushed back {}s", self.retry_backoff);
                        ClockState::SyncFailed(state, 1)
                    }
                    ClockState::SyncFailed(mut state, count) => {
                        state.last_sync_epoch += self.retry_backoff;
                        log_indented!(
                            "{} consecutive failures, next attempt pushed back {}s",
                            count + 1,
                            self.retry_backoff
                        );
                        ClockState::SyncFailed(state, count + 1)
                    }
                }
            }
        };

        TickOutcome::Refreshed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::logger::Log;
    use crate::core::garbage_day::GarbageColor;
    use crate::sync::fetch::MockTimeFetcher;
    use crate::sync::TimeProvider;
    use crate::time::SimulatedClock;

    const SATURDAY_EVENING: &str = r#"{"datetime":"2020-11-28T20:45:15.813019-08:00","dst":false,"utc_offset":"-08:00","day_of_week":6}"#;

    fn service(replies: Vec<anyhow::Result<String>>) -> TimeSyncService {
        let mut replies = replies.into_iter();
        let mut fetcher = MockTimeFetcher::new();
        fetcher.expect_fetch().returning(move |_| {
            replies
                .next()
                .unwrap_or_else(|| Err(anyhow::anyhow!("no more replies")))
        });
        TimeSyncService::new(
            TimeProvider::WorldTimeApi {
                base_url: "http://worldtimeapi.org/api".to_string(),
            },
            None,
            Box::new(fetcher),
        )
    }

    fn controller() -> ClockController {
        Log::set_enabled(false);
        ClockController::new(Duration::from_secs(60), Duration::from_secs(60))
    }

    fn ok(body: &str) -> anyhow::Result<String> {
        Ok(body.to_string())
    }

    fn offline() -> anyhow::Result<String> {
        Err(anyhow::anyhow!("offline"))
    }

    #[test]
    fn test_first_sync_sets_clock() {
        let mut controller = controller();
        let mut clock = SimulatedClock::at(2021, 1, 1, 0, 0, 0).unwrap();
        let mut service = service(vec![ok(SATURDAY_EVENING)]);

        let outcome = controller.tick(clock.epoch(), &mut service, &mut clock);

        assert_eq!(outcome, TickOutcome::Refreshed);
        assert_eq!(controller.status(), ClockStatus::Synced);
        let state = controller.sync_state().unwrap();
        assert_eq!(state.weekday, Some(6));
        assert_eq!(state.garbage.label, "4 days");
        assert_eq!(state.utc_offset.as_str(), "-08:00");

        let now = clock.local_now();
        assert_eq!((now.year, now.month, now.day, now.hour, now.minute), (2020, 11, 28, 20, 45));
        assert_eq!(state.last_sync_epoch, clock.epoch());
    }

    #[test]
    fn test_no_resync_before_interval() {
        let mut controller = controller();
        let mut clock = SimulatedClock::at(2021, 1, 1, 0, 0, 0).unwrap();
        let mut service = service(vec![ok(SATURDAY_EVENING)]);
        controller.tick(clock.epoch(), &mut service, &mut clock);

        clock.sleep(Duration::from_secs(60));
        assert_eq!(controller.tick(clock.epoch(), &mut service, &mut clock), TickOutcome::Idle);

        clock.sleep(Duration::from_secs(1));
        assert!(controller.is_due(clock.epoch()));
    }

    #[test]
    fn test_failed_first_sync_uses_fallback() {
        let mut controller = controller();
        let mut clock = SimulatedClock::at(2021, 1, 4, 9, 30, 0).unwrap();
        let mut service = service(vec![offline()]);
        let attempt = clock.epoch();

        assert_eq!(controller.tick(attempt, &mut service, &mut clock), TickOutcome::Refreshed);

        assert_eq!(controller.status(), ClockStatus::SyncFailed);
        assert_eq!(controller.fail_count(), 1);
        let state = controller.sync_state().unwrap();
        assert_eq!(state.last_sync_epoch, attempt);
        assert_eq!(state.weekday, None);
        assert_eq!(state.garbage.label, "???");
        assert_eq!(state.garbage.color, GarbageColor::Grey);
        assert_eq!(state.utc_offset, UtcOffset::unknown());
        assert_eq!(state.local_time, clock.local_now());
    }

    #[test]
    fn test_failed_first_sync_waits_before_retry() {
        let mut controller = controller();
        let mut clock = SimulatedClock::at(2021, 1, 4, 9, 30, 0).unwrap();
        let mut service = service(vec![offline(), ok(SATURDAY_EVENING)]);
        controller.tick(clock.epoch(), &mut service, &mut clock);

        for _ in 0..12 {
            clock.sleep(Duration::from_secs(5));
            assert_eq!(controller.tick(clock.epoch(), &mut service, &mut clock), TickOutcome::Idle);
        }

        clock.sleep(Duration::from_secs(1));
        assert_eq!(
            controller.tick(clock.epoch(), &mut service, &mut clock),
            TickOutcome::Refreshed
        );
        assert_eq!(controller.status(), ClockStatus::Synced);
        assert_eq!(controller.fail_count(), 0);
    }

    #[test]
    fn test_first_retry_follows_resync_interval_not_backoff() {
        let mut controller = ClockController::new(Duration::from_secs(300), Duration::from_secs(1800));
        Log::set_enabled(false);
        let mut clock = SimulatedClock::at(2021, 1, 4, 9, 30, 0).unwrap();
        let mut service = service(vec![offline(), ok(SATURDAY_EVENING)]);
        let attempt = clock.epoch();
        controller.tick(attempt, &mut service, &mut clock);

        assert!(!controller.is_due(attempt + 300));
        clock.sleep(Duration::from_secs(300));
        assert_eq!(controller.tick(clock.epoch(), &mut service, &mut clock), TickOutcome::Idle);

        clock.sleep(Duration::from_secs(1));
        assert_eq!(
            controller.tick(clock.epoch(), &mut service, &mut clock),
            TickOutcome::Refreshed
        );
        assert_eq!(controller.status(), ClockStatus::Synced);
    }

    #[test]
    fn test_failure_after_sync_keeps_state_and_backs_off() {
        let mut controller = ClockController::new(Duration::from_secs(60), Duration::from_secs(30));
        Log::set_enabled(false);
        let mut clock = SimulatedClock::at(2021, 1, 1, 0, 0, 0).unwrap();
        let mut service = service(vec![ok(SATURDAY_EVENING), offline(), offline()]);

        controller.tick(clock.epoch(), &mut service, &mut clock);
        let synced_at = controller.sync_state().unwrap().last_sync_epoch;

        clock.sleep(Duration::from_secs(61));
        controller.tick(clock.epoch(), &mut service, &mut clock);

        assert_eq!(controller.status(), ClockStatus::SyncFailed);
        let state = controller.sync_state().unwrap();
        assert_eq!(state.last_sync_epoch, synced_at + 30);
        assert_eq!(state.garbage.label, "4 days");
        assert_eq!(state.weekday, Some(6));

        // Next attempt once interval passes from the pushed-forward stamp.
        assert!(!controller.is_due(synced_at + 90));
        assert!(controller.is_due(synced_at + 91));

        controller.tick(synced_at + 91, &mut service, &mut clock);
        assert_eq!(controller.fail_count(), 2);
        assert_eq!(controller.sync_state().unwrap().last_sync_epoch, synced_at + 60);
    }

    #[test]
    fn test_sync_after_failures_recovers() {
        let mut controller = controller();
        let mut clock = SimulatedClock::at(2021, 1, 1, 0, 0, 0).unwrap();
        let mut service = service(vec![offline(), offline(), ok(SATURDAY_EVENING)]);

        controller.tick(clock.epoch(), &mut service, &mut clock);
        clock.sleep(Duration::from_secs(61));
        controller.tick(clock.epoch(), &mut service, &mut clock);
        assert_eq!(controller.fail_count(), 2);

        clock.sleep(Duration::from_secs(61));
        controller.tick(clock.epoch(), &mut service, &mut clock);

        assert_eq!(controller.status(), ClockStatus::Synced);
        assert_eq!(controller.sync_state().unwrap().weekday, Some(6));
    }
}
