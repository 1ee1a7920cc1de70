//! Offline fetcher that walks through the week.
//!
//! Every fetch answers with a WorldTimeAPI style body for the next day of the
//! week, starting on Sunday. Tuesday and Wednesday are shown twice, first at
//! 07:xx and then at 19:xx, so both halves of the garbage reminder appear.
//! Dates, minutes and the hour of the other days vary with the step counter.

use anyhow::Result;

use super::TimeFetcher;

const MORNING_HOUR: u32 = 7;
const EVENING_HOUR: u32 = 19;

/// Synthesizes time service replies instead of using the network.
#[derive(Debug, Default)]
pub struct DemoFetcher {
    step: u32,
    weekday: u8,
    repeating: bool,
}

impl DemoFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Weekday and hour of the next reply, advancing the walk.
    fn next_slot(&mut self) -> (u8, u32) {
        let weekday = self.weekday;
        let hour = match weekday {
            2 | 3 if self.repeating => EVENING_HOUR,
            2 | 3 => MORNING_HOUR,
            _ => 6 + (self.step * 5) % 15,
        };

        if matches!(weekday, 2 | 3) && !self.repeating {
            self.repeating = true;
        } else {
            self.repeating = false;
            self.weekday = (weekday + 1) % 7;
        }
        (weekday, hour)
    }
}

impl TimeFetcher for DemoFetcher {
    fn fetch(&mut self, _url: &str) -> Result<String> {
        let (weekday, hour) = self.next_slot();
        let month = 1 + self.step % 12;
        let day = 1 + (self.step * 7) % 28;
        let minute = 10 + (self.step * 13) % 50;
        self.step = self.step.wrapping_add(1);

        let body = serde_json::json!({
            "datetime": format!("2020-{month:02}-{day:02}T{hour:02}:{minute:02}:15.813019-08:00"),
            "dst": false,
            "utc_offset": "-08:00",
            "day_of_week": weekday,
        });
        Ok(body.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::TimeProvider;

    fn walk(steps: usize) -> Vec<(u8, u32, &'static str)> {
        crate::common::logger::Log::set_enabled(false);
        let provider = TimeProvider::WorldTimeApi {
            base_url: String::new(),
        };
        let mut fetcher = DemoFetcher::new();
        (0..steps)
            .map(|_| {
                let body = fetcher.fetch("demo").unwrap();
                let reading = provider.parse_response(&body).unwrap();
                let garbage = crate::core::garbage_day::evaluate(
                    reading.weekday,
                    reading.local_time.hour,
                    reading.local_time.minute,
                );
                (reading.weekday, reading.local_time.hour, garbage.label)
            })
            .collect()
    }

    #[test]
    fn test_walks_week_with_tuesday_and_wednesday_twice() {
        let days: Vec<u8> = walk(9).iter().map(|(day, _, _)| *day).collect();
        assert_eq!(days, [0, 1, 2, 2, 3, 3, 4, 5, 6]);

        let days: Vec<u8> = walk(10).iter().map(|(day, _, _)| *day).collect();
        assert_eq!(days[9], 0);
    }

    #[test]
    fn test_tuesday_and_wednesday_show_both_states() {
        let slots = walk(6);
        assert_eq!(slots[2], (2, 7, "2nite"));
        assert_eq!(slots[3], (2, 19, "NOW"));
        assert_eq!(slots[4], (3, 7, "NOW"));
        assert_eq!(slots[5], (3, 19, "done"));
    }

    #[test]
    fn test_other_days_stay_in_daytime() {
        for (day, hour, _) in walk(27) {
            if !matches!(day, 2 | 3) {
                assert!((6..=20).contains(&hour), "hour {hour} on day {day}");
            }
        }
    }
}
