//! Turns the clock reading and sync state into a positioned frame.
//!
//! Colours and night mode follow the hour of the last sync, while the time
//! and date text follow the running clock. Between syncs the two can differ
//! by up to one resync interval, so a label may keep its morning colour for a
//! short while after noon.

use crate::common::color::Rgb;
use crate::common::constants::{
    COLOR_AFTERNOON, COLOR_DATE, COLOR_MORNING, COLOR_OUTLINE, DATE_OFFSET_Y, NIGHT_END_HOUR,
    NIGHT_START_HOUR, TRASH_CENTER_X, TRASH_LABEL_OFFSET_Y, WEEKDAY_INDENT,
};
use crate::core::clock_controller::SyncState;
use crate::core::garbage_day::weekday_abbreviation;
use crate::display::layout::{Font, HelveticaMetrics, Orientation, TextMetrics};
use crate::display::{DayFrame, DisplayFrame, ImageElement, TextLabel};
use crate::time::LocalTime;

/// Whether the panel stays dark at `hour`.
pub fn is_night_mode(hour: u32) -> bool {
    hour >= NIGHT_START_HOUR || hour <= NIGHT_END_HOUR
}

/// `H:MM` in 12-hour style (midnight is 12, no padding), `HH:MM` otherwise.
pub fn format_hh_mm(time: &LocalTime, twelve_hour: bool) -> String {
    let hour = if twelve_hour {
        match time.hour {
            0 => "12".to_string(),
            13.. => (time.hour - 12).to_string(),
            h => h.to_string(),
        }
    } else {
        format!("{:02}", time.hour)
    };
    format!("{hour}:{:02}", time.minute)
}

/// Startup splash for the board's rotation.
pub fn splash_frame(orientation: Orientation) -> DisplayFrame {
    DisplayFrame::Splash {
        asset_key: format!("garbage-start-{}", orientation.degrees()),
    }
}

pub struct DisplayStateComposer {
    metrics: Box<dyn TextMetrics>,
    twelve_hour: bool,
}

impl DisplayStateComposer {
    pub fn new(twelve_hour: bool) -> Self {
        Self::with_metrics(Box::new(HelveticaMetrics), twelve_hour)
    }

    pub fn with_metrics(metrics: Box<dyn TextMetrics>, twelve_hour: bool) -> Self {
        Self {
            metrics,
            twelve_hour,
        }
    }

    pub fn compose(
        &self,
        local_now: &LocalTime,
        sync: &SyncState,
        orientation: Orientation,
    ) -> DisplayFrame {
        let synced_hour = sync.local_time.hour;
        if is_night_mode(synced_hour) {
            return DisplayFrame::Night;
        }

        let layout = orientation.layout();
        let garbage_color = sync.garbage.color_value;

        let garbage_label = self.label(
            sync.garbage.label,
            Font::Small,
            garbage_color,
            |w| TRASH_CENTER_X - w.div_euclid(2),
            layout.trash_y + TRASH_LABEL_OFFSET_Y,
        );
        let outline = |dx: i32, dy: i32| TextLabel {
            x: garbage_label.x + dx,
            y: garbage_label.y + dy,
            color: Rgb::new(COLOR_OUTLINE),
            ..garbage_label.clone()
        };
        let garbage_outline = [outline(0, -1), outline(-1, 0), outline(1, 0), outline(0, 1)];

        let weekday_text = format!("{}   ", weekday_abbreviation(sync.weekday));
        let weekday_label = self.label(
            &weekday_text,
            Font::Small,
            garbage_color,
            |w| layout.center_x - (w + WEEKDAY_INDENT).div_euclid(2) + WEEKDAY_INDENT,
            layout.event_y,
        );

        let time_color = if synced_hour < 12 {
            COLOR_MORNING
        } else {
            COLOR_AFTERNOON
        };
        let centered = |w: i32| layout.center_x - w.div_euclid(2);
        let time_label = self.label(
            &format_hh_mm(local_now, self.twelve_hour),
            Font::Large,
            Rgb::new(time_color),
            centered,
            layout.time_y,
        );
        let date_label = self.label(
            &format!("{}.{}", local_now.month, local_now.day),
            Font::Small,
            Rgb::new(COLOR_DATE),
            centered,
            layout.time_y + DATE_OFFSET_Y,
        );

        DisplayFrame::Day(DayFrame {
            trash: ImageElement {
                asset_key: format!("garbage_can_{}", sync.garbage.color.name()),
                x: 0,
                y: layout.trash_y,
            },
            garbage_outline,
            garbage_label,
            time_label,
            date_label,
            weekday_label,
        })
    }

    /// Build a label whose x position depends on its rendered width.
    fn label(
        &self,
        text: &str,
        font: Font,
        color: Rgb,
        x_for_width: impl Fn(i32) -> i32,
        y: i32,
    ) -> TextLabel {
        let width = self.metrics.text_width(text, font);
        TextLabel {
            text: text.to_string(),
            x: x_for_width(width),
            y,
            color,
            font,
        }
    }
}
