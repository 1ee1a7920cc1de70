//! Clock abstraction for the board's real-time clock.
//!
//! The render loop reads the clock every frame, the clock controller sets it
//! after each successful sync, and the loop sleeps through it between frames.
//! [`SystemClock`] keeps a software RTC on the host; [`SimulatedClock`] moves
//! only when told to, which makes the loop deterministic under test.

use chrono::{Local, NaiveDateTime, TimeDelta};
use std::time::{Duration, Instant};

use super::LocalTime;

/// Read, set and sleep on the board clock.
pub trait Clock {
    /// Current local wall-clock time.
    fn local_now(&self) -> LocalTime;

    /// Current time in epoch seconds, on the same timeline as [`LocalTime::epoch`].
    fn epoch(&self) -> i64 {
        self.local_now().epoch().unwrap_or_default()
    }

    /// Set the clock to a freshly synchronized local time.
    fn set_local(&mut self, time: LocalTime);

    /// Block for `duration` (or simulate doing so).
    fn sleep(&mut self, duration: Duration);
}

/// Software real-time clock anchored on the last synchronized time.
///
/// Until the first [`Clock::set_local`] it reports the host's local time.
#[derive(Debug, Default)]
pub struct SystemClock {
    anchor: Option<(NaiveDateTime, Instant)>,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the clock has been set from a sync at least once.
    pub fn is_anchored(&self) -> bool {
        self.anchor.is_some()
    }
}

impl Clock for SystemClock {
    fn local_now(&self) -> LocalTime {
        let now = match self.anchor {
            Some((synced, at)) => {
                synced + TimeDelta::from_std(at.elapsed()).unwrap_or(TimeDelta::zero())
            }
            None => Local::now().naive_local(),
        };
        LocalTime::from_naive(now)
    }

    fn set_local(&mut self, time: LocalTime) {
        match time.to_naive() {
            Some(naive) => self.anchor = Some((naive, Instant::now())),
            None => log_warning!("Ignoring invalid clock time {}", time),
        }
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Manually driven clock: time only advances through `sleep`, `advance` or `set_local`.
#[derive(Debug, Clone)]
pub struct SimulatedClock {
    now: NaiveDateTime,
    total_slept: Duration,
}

impl SimulatedClock {
    pub fn new(start: NaiveDateTime) -> Self {
        Self {
            now: start,
            total_slept: Duration::ZERO,
        }
    }

    /// Start at the given calendar time, or `None` if it does not exist.
    pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Option<Self> {
        LocalTime::new(year, month, day, hour, minute, second)
            .to_naive()
            .map(Self::new)
    }

    /// Move the clock forward without counting it as sleep.
    pub fn advance(&mut self, duration: Duration) {
        self.now += TimeDelta::from_std(duration).unwrap_or(TimeDelta::zero());
    }

    /// Total time spent in [`Clock::sleep`].
    pub fn total_slept(&self) -> Duration {
        self.total_slept
    }
}

impl Clock for SimulatedClock {
    fn local_now(&self) -> LocalTime {
        LocalTime::from_naive(self.now)
    }

    fn set_local(&mut self, time: LocalTime) {
        if let Some(naive) = time.to_naive() {
            self.now = naive;
        }
    }

    fn sleep(&mut self, duration: Duration) {
        self.advance(duration);
        self.total_slept += duration;
    }
}
