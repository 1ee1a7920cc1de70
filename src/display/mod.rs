//! What the matrix shows, and the sinks that show it.
//!
//! A [`DisplayFrame`] is a complete description of one screen: nothing, the
//! startup splash, or the daytime scene with every element already
//! positioned. Sinks only draw what they are given.

pub mod compose;
pub mod layout;
pub mod terminal;

pub use compose::DisplayStateComposer;
pub use layout::{
    FixedOrientation, FixedWidthMetrics, Font, HelveticaMetrics, LayoutProfile, Orientation,
    OrientationProvider, TextMetrics,
};
pub use terminal::TerminalSink;

use anyhow::Result;

use crate::common::color::Rgb;

/// A positioned line of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLabel {
    pub text: String,
    pub x: i32,
    pub y: i32,
    pub color: Rgb,
    pub font: Font,
}

/// A positioned bitmap, referenced by asset key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageElement {
    pub asset_key: String,
    pub x: i32,
    pub y: i32,
}

/// The daytime scene, listed in stacking order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayFrame {
    pub trash: ImageElement,
    /// Background coloured copies of the garbage label, offset up, left, right and down.
    pub garbage_outline: [TextLabel; 4],
    pub garbage_label: TextLabel,
    pub time_label: TextLabel,
    pub date_label: TextLabel,
    pub weekday_label: TextLabel,
}

impl DayFrame {
    /// Text labels in the order they are drawn.
    pub fn labels(&self) -> impl Iterator<Item = &TextLabel> {
        self.garbage_outline.iter().chain([
            &self.garbage_label,
            &self.time_label,
            &self.date_label,
            &self.weekday_label,
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayFrame {
    /// Blank panel.
    Night,
    /// Startup image shown until the first sync.
    Splash { asset_key: String },
    Day(DayFrame),
}

impl DisplayFrame {
    pub fn is_night_mode(&self) -> bool {
        matches!(self, DisplayFrame::Night)
    }
}

/// Output surface for rendered frames.
#[cfg_attr(test, mockall::automock)]
pub trait DisplaySink {
    /// Replace whatever is on the panel with `frame`.
    fn show(&mut self, frame: &DisplayFrame) -> Result<()>;

    fn sink_name(&self) -> &'static str;

    /// Leave the surface in a clean state on shutdown.
    fn cleanup(&mut self) {}
}
