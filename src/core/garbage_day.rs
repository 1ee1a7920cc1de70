//! Garbage day countdown derived from weekday and time of day.
//!
//! Collection happens Wednesday morning. Bins go out Tuesday evening, so
//! Tuesday shows a yellow "2nite" reminder until 19:00 and a red "NOW" from
//! then until Wednesday 08:00, when the reminder turns into a green "done".
//! Every other day counts down to the next Tuesday night.

use crate::common::color::Rgb;
use crate::common::constants::{
    COLOR_GREEN, COLOR_GREY, COLOR_RED, COLOR_YELLOW, TUESDAY_CURB_HOUR,
    WEDNESDAY_PICKUP_DONE_HOUR,
};
use std::fmt;

/// Colour class of a garbage day state; also selects the trash can bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GarbageColor {
    Green,
    Yellow,
    Red,
    Grey,
}

impl GarbageColor {
    /// Lowercase name used in asset keys.
    pub fn name(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Red => "red",
            Self::Grey => "grey",
        }
    }

    pub fn value(self) -> Rgb {
        match self {
            Self::Green => Rgb::new(COLOR_GREEN),
            Self::Yellow => Rgb::new(COLOR_YELLOW),
            Self::Red => Rgb::new(COLOR_RED),
            Self::Grey => Rgb::new(COLOR_GREY),
        }
    }
}

impl fmt::Display for GarbageColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What the garbage label shows: text plus colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GarbageDayState {
    pub label: &'static str,
    pub color: GarbageColor,
    pub color_value: Rgb,
}

impl GarbageDayState {
    const fn with(label: &'static str, color: GarbageColor, value: u32) -> Self {
        Self {
            label,
            color,
            color_value: Rgb::new(value),
        }
    }

    /// Shown before the first successful sync, when the weekday is unknown.
    pub const fn unknown() -> Self {
        Self::with("???", GarbageColor::Grey, COLOR_GREY)
    }

    pub fn is_unknown(&self) -> bool {
        self.color == GarbageColor::Grey
    }
}

const fn green(label: &'static str) -> GarbageDayState {
    GarbageDayState::with(label, GarbageColor::Green, COLOR_GREEN)
}

const TONIGHT: GarbageDayState = GarbageDayState::with("2nite", GarbageColor::Yellow, COLOR_YELLOW);
const NOW: GarbageDayState = GarbageDayState::with("NOW", GarbageColor::Red, COLOR_RED);

/// Map weekday (0 = Sunday), hour and minute to the garbage day state.
///
/// Total and pure. Weekdays outside `0..=6` map to [`GarbageDayState::unknown`].
pub fn evaluate(weekday: u8, hour: u32, minute: u32) -> GarbageDayState {
    match weekday {
        0 => green("3 days"),
        1 => green("2 days"),
        2 if hour < TUESDAY_CURB_HOUR => TONIGHT,
        2 => NOW,
        3 if (hour, minute) < (WEDNESDAY_PICKUP_DONE_HOUR, 0) => NOW,
        3 => green("done"),
        4 => green("6 days"),
        5 => green("5 days"),
        6 => green("4 days"),
        _ => GarbageDayState::unknown(),
    }
}

/// Three-letter weekday label, `"???"` when unknown.
pub fn weekday_abbreviation(weekday: Option<u8>) -> &'static str {
    match weekday {
        Some(0) => "SUN",
        Some(1) => "MON",
        Some(2) => "TUE",
        Some(3) => "WED",
        Some(4) => "THU",
        Some(5) => "FRI",
        Some(6) => "SAT",
        _ => "???",
    }
}
