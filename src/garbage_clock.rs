//! Application coordinator that manages the complete lifecycle of garbage-clock.
//!
//! This module handles resource acquisition, initialization, and orchestration
//! of the core render loop. It manages:
//! - Configuration loading, with the `--demo` override applied on top
//! - Choosing the time fetcher (HTTP or the offline demo walk)
//! - Building the clock controller, composer and display sink
//! - Signal handler setup
//!
//! The `GarbageClock` struct uses a builder pattern:
//! - Normal startup: `GarbageClock::new(debug_enabled).run()`
//! - Offline demo: `GarbageClock::new(debug_enabled).demo().run()`

use anyhow::{Context, Result};

use crate::{
    common::logger::Log,
    config::{self, Config},
    core::{Core, CoreParams, clock_controller::ClockController},
    display::{DisplayStateComposer, FixedOrientation, OrientationProvider, TerminalSink},
    io::signals::setup_signal_handler,
    sync::{DemoFetcher, HttpFetcher, TimeFetcher, TimeSyncService},
    time::SystemClock,
};

/// Builder for configuring and running the garbage-clock application.
///
/// # Examples
///
/// ```no_run
/// use garbage_clock::GarbageClock;
///
/// # fn main() -> anyhow::Result<()> {
/// GarbageClock::new(false)
///     .with_config_dir(Some("/etc/garbage-clock".to_string()))
///     .run()?;
/// # Ok(())
/// # }
/// ```
pub struct GarbageClock {
    debug_enabled: bool,
    config_dir: Option<String>,
    force_demo: bool,
}

impl GarbageClock {
    /// Create a new runner with defaults matching normal run
    pub fn new(debug_enabled: bool) -> Self {
        Self {
            debug_enabled,
            config_dir: None,
            force_demo: false,
        }
    }

    /// Read `garbage-clock.toml` from this directory instead of the default location
    pub fn with_config_dir(mut self, dir: Option<String>) -> Self {
        self.config_dir = dir;
        self
    }

    /// Run the offline demo regardless of the configuration file
    pub fn demo(mut self) -> Self {
        self.force_demo = true;
        self
    }

    /// Execute the application with the configured settings.
    ///
    /// Returns once a shutdown signal has been handled and the display released.
    pub fn run(self) -> Result<()> {
        log_version!();

        if self.debug_enabled {
            Log::set_timestamps(true);
            log_pipe!();
            log_debug!("Debug mode enabled, logging every frame and request");
        }

        if self.config_dir.is_some() {
            config::set_config_dir(self.config_dir.clone())?;
        }

        let mut config = Config::load()?;
        if self.force_demo {
            config.demo = Some(true);
        }
        config.log_config();

        let signal_state = setup_signal_handler(self.debug_enabled)?;

        let service = time_sync_service(&config, self.debug_enabled)?;
        let orientation = FixedOrientation(config.orientation()).orientation();

        let core = Core::new(CoreParams {
            sink: Box::new(TerminalSink::stdout(orientation)),
            clock: Box::new(SystemClock::new()),
            service,
            controller: ClockController::from_config(&config),
            composer: DisplayStateComposer::new(config.twelve_hour()),
            orientation,
            render_interval: config.render_interval(),
            signal_state,
            debug_enabled: self.debug_enabled,
        });

        core.execute()
    }
}

/// Wire the time provider to the offline demo walk or the HTTP client.
fn time_sync_service(config: &Config, debug_enabled: bool) -> Result<TimeSyncService> {
    let fetcher: Box<dyn TimeFetcher> = if config.is_demo() {
        Box::new(DemoFetcher::new())
    } else {
        Box::new(
            HttpFetcher::new(config.request_timeout(), debug_enabled)
                .context("Failed to create HTTP client")?,
        )
    };
    Ok(TimeSyncService::new(
        config.time_provider(),
        config.timezone.clone(),
        fetcher,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimeProviderKind;
    use crate::config::validation::validate_config;

    #[test]
    fn test_demo_syncs_with_adafruit_provider_configured() {
        Log::set_enabled(false);
        let config = Config {
            time_provider: Some(TimeProviderKind::AdafruitIo),
            demo: Some(true),
            ..Config::default()
        };
        assert!(validate_config(&config).is_ok());

        let mut service = time_sync_service(&config, false).unwrap();
        let synced = service.sync().unwrap();

        assert_eq!(synced.weekday, 0);
        assert_eq!(synced.garbage.label, "3 days");
    }

    #[test]
    fn test_live_service_keeps_configured_provider() {
        let config = Config {
            time_provider: Some(TimeProviderKind::AdafruitIo),
            aio_username: Some("board".to_string()),
            aio_key: Some("secret".to_string()),
            ..Config::default()
        };

        let service = time_sync_service(&config, false).unwrap();

        assert_eq!(service.provider(), &config.time_provider());
        assert_eq!(service.provider().name(), "adafruit_io");
    }
}
