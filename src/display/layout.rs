//! Board orientation, per-orientation layout anchors and text metrics.

use std::f64::consts::PI;

use crate::common::constants::VALID_ROTATIONS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Landscape0,
    Portrait90,
    Landscape180,
    Portrait270,
}

impl Orientation {
    pub fn is_landscape(self) -> bool {
        matches!(self, Orientation::Landscape0 | Orientation::Landscape180)
    }

    pub fn is_portrait(self) -> bool {
        !self.is_landscape()
    }

    /// Display rotation in degrees.
    pub fn degrees(self) -> u32 {
        match self {
            Orientation::Landscape0 => 0,
            Orientation::Portrait90 => 90,
            Orientation::Landscape180 => 180,
            Orientation::Portrait270 => 270,
        }
    }

    /// Orientation for a rotation of 0, 90, 180 or 270 degrees.
    pub fn from_degrees(degrees: u32) -> Option<Self> {
        match degrees {
            0 => Some(Orientation::Landscape0),
            90 => Some(Orientation::Portrait90),
            180 => Some(Orientation::Landscape180),
            270 => Some(Orientation::Portrait270),
            _ => None,
        }
    }

    /// Orientation from an accelerometer reading taken with the board at rest.
    ///
    /// Gravity along +Y (board standing on its bottom edge) is the upright
    /// landscape position; the angle of the gravity vector in the X/Y plane is
    /// quantized to the nearest quarter turn.
    pub fn from_acceleration(x: f64, y: f64) -> Self {
        let turn = ((-y).atan2(-x) + PI) / (2.0 * PI) + 0.875;
        let quarter = ((turn * 4.0) as i64).rem_euclid(4) as usize;
        match Self::from_degrees(VALID_ROTATIONS[quarter]) {
            Some(orientation) => orientation,
            None => Orientation::Landscape0,
        }
    }

    pub fn layout(self) -> LayoutProfile {
        if self.is_landscape() {
            LayoutProfile::LANDSCAPE
        } else {
            LayoutProfile::PORTRAIT
        }
    }
}

/// Source of the board orientation, read once at startup.
pub trait OrientationProvider {
    fn orientation(&self) -> Orientation;
}

/// Orientation fixed by configuration.
#[derive(Debug, Clone, Copy)]
pub struct FixedOrientation(pub Orientation);

impl OrientationProvider for FixedOrientation {
    fn orientation(&self) -> Orientation {
        self.0
    }
}

/// Anchor positions for one orientation, in matrix pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutProfile {
    /// Horizontal center of the time, date and weekday column.
    pub center_x: i32,
    pub time_y: i32,
    /// Baseline of the weekday label.
    pub event_y: i32,
    /// Top of the trash can bitmap.
    pub trash_y: i32,
}

impl LayoutProfile {
    /// Trash can on the left, text column on the right.
    pub const LANDSCAPE: Self = Self {
        center_x: 48,
        time_y: 6,
        event_y: 26,
        trash_y: 0,
    };

    /// Text on top, trash can below.
    pub const PORTRAIT: Self = Self {
        center_x: 16,
        time_y: 6,
        event_y: 26,
        trash_y: 32,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    /// 10 px regular, used for everything but the time.
    Small,
    /// 12 px bold, used for the time.
    Large,
}

/// Rendered text width.
pub trait TextMetrics {
    fn text_width(&self, text: &str, font: Font) -> i32;
}

/// Advance widths of the 75 dpi Helvetica bitmap fonts (`helvR10`, `helvB12`).
///
/// Covers digits, punctuation and ASCII letters; anything else gets the
/// width of a digit.
#[derive(Debug, Clone, Copy, Default)]
pub struct HelveticaMetrics;

impl HelveticaMetrics {
    fn small_advance(c: char) -> i32 {
        match c {
            ' ' | ':' | '.' | '!' | 'I' | 'f' | 't' => 3,
            'i' | 'j' | 'l' => 2,
            'r' => 4,
            'J' | 'a' | 'c' | 'e' | 'k' | 's' | 'v' | 'x' | 'y' | 'z' => 5,
            '0'..='9' | '?' | 'F' | 'L' | 'b' | 'd' | 'g' | 'h' | 'n' | 'o' | 'p' | 'q' | 'u' => {
                6
            }
            'A' | 'B' | 'E' | 'K' | 'P' | 'R' | 'S' | 'T' | 'V' | 'X' | 'Y' | 'Z' => 7,
            'C' | 'D' | 'G' | 'H' | 'N' | 'O' | 'Q' | 'U' | 'm' | 'w' => 8,
            'M' => 9,
            'W' => 10,
            _ => 6,
        }
    }

    fn large_advance(c: char) -> i32 {
        match c {
            ' ' | ':' | '.' | '!' | 'i' | 'j' | 'l' => 4,
            'f' | 't' | 'I' | 'r' => 5,
            '0'..='9' | '?' | 'a' | 'c' | 'e' | 'k' | 's' | 'v' | 'x' | 'y' | 'z' => 7,
            'b' | 'd' | 'g' | 'h' | 'n' | 'o' | 'p' | 'q' | 'u' | 'J' | 'L' => 8,
            'M' | 'm' => 11,
            'W' | 'w' => 12,
            _ => 9,
        }
    }
}

impl TextMetrics for HelveticaMetrics {
    fn text_width(&self, text: &str, font: Font) -> i32 {
        let advance = match font {
            Font::Small => Self::small_advance,
            Font::Large => Self::large_advance,
        };
        text.chars().map(advance).sum()
    }
}

/// Every glyph has the same width; handy for predictable positions.
#[derive(Debug, Clone, Copy)]
pub struct FixedWidthMetrics {
    pub small: i32,
    pub large: i32,
}

impl TextMetrics for FixedWidthMetrics {
    fn text_width(&self, text: &str, font: Font) -> i32 {
        let width = match font {
            Font::Small => self.small,
            Font::Large => self.large,
        };
        text.chars().count() as i32 * width
    }
}
