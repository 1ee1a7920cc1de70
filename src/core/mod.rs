//! Core application logic: the render loop.
//!
//! Every iteration reads the board clock and lets the [`ClockController`]
//! resync if one is due. After a sync attempt the iteration ends at once so
//! the next one starts from the freshly set clock; otherwise a frame is
//! composed, handed to the display sink, and the loop sleeps for the render
//! interval. Sleeping happens in short chunks so a shutdown signal is
//! noticed within a second.
//!
//! Display failures are logged and never stop the loop; the next frame
//! simply tries again.

pub mod clock_controller;
pub mod garbage_day;

use anyhow::Result;
use std::time::Duration;

use crate::{
    core::clock_controller::{ClockController, TickOutcome},
    display::{DisplayFrame, DisplaySink, DisplayStateComposer, Orientation, compose},
    io::signals::SignalState,
    sync::TimeSyncService,
    time::Clock,
};

/// Longest single sleep while waiting for the next frame.
const SLEEP_CHUNK: Duration = Duration::from_secs(1);

/// Parameters for creating a Core instance.
///
/// This struct bundles all the dependencies needed to create a Core,
/// following the idiomatic Rust pattern to avoid functions with too many parameters.
pub struct CoreParams {
    pub sink: Box<dyn DisplaySink>,
    pub clock: Box<dyn Clock>,
    pub service: TimeSyncService,
    pub controller: ClockController,
    pub composer: DisplayStateComposer,
    pub orientation: Orientation,
    pub render_interval: Duration,
    pub signal_state: SignalState,
    pub debug_enabled: bool,
}

/// What one iteration of the loop did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// A sync was attempted; nothing was drawn and no time was slept.
    Resynced,
    /// This frame was handed to the sink, followed by the render sleep.
    Rendered(DisplayFrame),
}

/// The render loop and everything it drives.
pub struct Core {
    sink: Box<dyn DisplaySink>,
    clock: Box<dyn Clock>,
    service: TimeSyncService,
    controller: ClockController,
    composer: DisplayStateComposer,
    orientation: Orientation,
    render_interval: Duration,
    signal_state: SignalState,
    debug_enabled: bool,
    night_mode: Option<bool>,
}

impl Core {
    pub fn new(params: CoreParams) -> Self {
        Self {
            sink: params.sink,
            clock: params.clock,
            service: params.service,
            controller: params.controller,
            composer: params.composer,
            orientation: params.orientation,
            render_interval: params.render_interval,
            signal_state: params.signal_state,
            debug_enabled: params.debug_enabled,
            night_mode: None,
        }
    }

    pub fn controller(&self) -> &ClockController {
        &self.controller
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Show the splash, run until shutdown is requested, then release the display.
    pub fn execute(mut self) -> Result<()> {
        log_block_start!(
            "Drawing to {} display, rotation {}°",
            self.sink.sink_name(),
            self.orientation.degrees()
        );

        let splash = compose::splash_frame(self.orientation);
        if let Err(e) = self.sink.show(&splash) {
            log_warning!("Failed to show splash screen: {e}");
        }

        self.main_loop();

        log_block_start!("Shutting down garbage-clock...");
        self.sink.cleanup();
        log_end!();

        Ok(())
    }

    fn main_loop(&mut self) {
        while self.signal_state.is_running() {
            self.step();
        }
    }

    /// Run one iteration of the loop.
    pub fn step(&mut self) -> StepOutcome {
        let now = self.clock.epoch();
        let outcome = self
            .controller
            .tick(now, &mut self.service, self.clock.as_mut());
        if outcome == TickOutcome::Refreshed {
            return StepOutcome::Resynced;
        }

        let local_now = self.clock.local_now();
        let frame = match self.controller.sync_state() {
            Some(sync) => self.composer.compose(&local_now, sync, self.orientation),
            None => compose::splash_frame(self.orientation),
        };

        self.track_night_mode(&frame);
        if self.debug_enabled {
            log_debug!("Frame at {}: {}", local_now, describe(&frame));
        }

        if let Err(e) = self.sink.show(&frame) {
            log_error!("Failed to update {} display: {e:#}", self.sink.sink_name());
        }

        self.sleep_until_next_frame();
        StepOutcome::Rendered(frame)
    }

    fn track_night_mode(&mut self, frame: &DisplayFrame) {
        if matches!(frame, DisplayFrame::Splash { .. }) {
            return;
        }
        let night = frame.is_night_mode();
        if self.night_mode != Some(night) {
            if night {
                log_block_start!("Night mode on, panel dark");
            } else if self.night_mode.is_some() {
                log_block_start!("Night mode off");
            }
            self.night_mode = Some(night);
        }
    }

    fn sleep_until_next_frame(&mut self) {
        let mut remaining = self.render_interval;
        while !remaining.is_zero() && self.signal_state.is_running() {
            let chunk = remaining.min(SLEEP_CHUNK);
            self.clock.sleep(chunk);
            remaining -= chunk;
        }
    }
}

fn describe(frame: &DisplayFrame) -> String {
    match frame {
        DisplayFrame::Night => "night".to_string(),
        DisplayFrame::Splash { asset_key } => format!("splash {asset_key}"),
        DisplayFrame::Day(day) => format!(
            "{} {} {} / {}",
            day.time_label.text,
            day.date_label.text,
            day.weekday_label.text.trim_end(),
            day.garbage_label.text
        ),
    }
}
