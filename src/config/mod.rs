//! Configuration system for garbage-clock.
//!
//! Settings live in `garbage-clock.toml`, looked up in
//! `$XDG_CONFIG_HOME/garbage-clock/` unless a directory is given with
//! `--config`. A commented default file is written on first start. Every
//! field is optional; missing values fall back to the defaults in
//! [`crate::common::constants`].
//!
//! ```toml
//! #[Time service]
//! time_provider = "worldtimeapi"               # "worldtimeapi" or "adafruit_io"
//! time_api_url = "http://worldtimeapi.org/api" # Base URL of the time service
//! # timezone = "America/New_York"              # IANA name; omit to locate by IP
//! # aio_username = "..."                       # Adafruit IO user (adafruit_io only)
//! # aio_key = "..."                            # Adafruit IO key (adafruit_io only)
//!
//! #[Display]
//! twelve_hour = true                           # 12-hour clock without leading zero
//! rotation = 0                                 # Panel rotation: 0, 90, 180 or 270
//! demo = false                                 # Walk through the week offline
//!
//! #[Timing]
//! resync_interval = 60                         # Seconds between syncs (5-86400)
//! retry_backoff = 60                           # Seconds added after a failed sync (5-86400)
//! render_interval = 5                          # Seconds between frames (1-60)
//! request_timeout = 15                         # HTTP timeout in seconds (1-120)
//! ```
//!
//! Values are range checked on load and an out of range value is an error
//! naming the field, never silently clamped.

pub mod builder;
pub mod loading;
pub mod validation;

use anyhow::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::common::constants::*;
use crate::display::Orientation;
use crate::sync::TimeProvider;

pub use builder::create_default_config;
pub use loading::{get_config_path, get_custom_config_dir, load, load_from_path, set_config_dir};

/// Network time service to sync from.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum TimeProviderKind {
    /// worldtimeapi.org, no account needed.
    #[serde(rename = "worldtimeapi")]
    WorldTimeApi,
    /// Adafruit IO time integration, requires `aio_username` and `aio_key`.
    #[serde(rename = "adafruit_io")]
    AdafruitIo,
}

impl TimeProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeProviderKind::WorldTimeApi => "worldtimeapi",
            TimeProviderKind::AdafruitIo => "adafruit_io",
        }
    }

    fn default_url(&self) -> &'static str {
        match self {
            TimeProviderKind::WorldTimeApi => DEFAULT_WORLDTIMEAPI_URL,
            TimeProviderKind::AdafruitIo => DEFAULT_ADAFRUIT_IO_URL,
        }
    }
}

/// Settings loaded from `garbage-clock.toml`.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    /// IANA time zone name. `None` lets the time service locate the board by IP.
    pub timezone: Option<String>,
    pub time_provider: Option<TimeProviderKind>,
    /// Base URL of the time service; defaults to the provider's public endpoint.
    pub time_api_url: Option<String>,
    pub aio_username: Option<String>,
    pub aio_key: Option<String>,
    pub twelve_hour: Option<bool>,
    /// Offline demo walking through the week.
    pub demo: Option<bool>,
    /// Seconds between syncs.
    pub resync_interval: Option<u64>,
    /// Seconds a failed sync pushes the next attempt back.
    pub retry_backoff: Option<u64>,
    /// Seconds between frames.
    pub render_interval: Option<u64>,
    /// HTTP request timeout in seconds.
    pub request_timeout: Option<u64>,
    /// Panel rotation in degrees.
    pub rotation: Option<u32>,
}

impl Config {
    pub fn load() -> Result<Self> {
        loading::load()
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        loading::load_from_path(path)
    }

    pub fn get_config_path() -> Result<PathBuf> {
        loading::get_config_path()
    }

    pub fn create_default_config(path: &Path) -> Result<()> {
        builder::create_default_config(path)
    }

    pub fn time_provider_kind(&self) -> TimeProviderKind {
        self.time_provider.unwrap_or(TimeProviderKind::WorldTimeApi)
    }

    /// Provider with base URL and credentials resolved.
    ///
    /// Demo mode always answers in the WorldTimeAPI format, so it gets that
    /// provider whatever `time_provider` says.
    pub fn time_provider(&self) -> TimeProvider {
        if self.is_demo() {
            return TimeProvider::WorldTimeApi {
                base_url: TimeProviderKind::WorldTimeApi.default_url().to_string(),
            };
        }
        let kind = self.time_provider_kind();
        let base_url = self
            .time_api_url
            .clone()
            .unwrap_or_else(|| kind.default_url().to_string());
        match kind {
            TimeProviderKind::WorldTimeApi => TimeProvider::WorldTimeApi { base_url },
            TimeProviderKind::AdafruitIo => TimeProvider::AdafruitIo {
                base_url,
                username: self.aio_username.clone().unwrap_or_default(),
                key: self.aio_key.clone().unwrap_or_default(),
            },
        }
    }

    pub fn twelve_hour(&self) -> bool {
        self.twelve_hour.unwrap_or(DEFAULT_TWELVE_HOUR)
    }

    pub fn is_demo(&self) -> bool {
        self.demo.unwrap_or(DEFAULT_DEMO)
    }

    /// Resync interval; demo mode advances a day on every short resync.
    pub fn resync_interval(&self) -> Duration {
        if self.is_demo() {
            return Duration::from_secs(DEMO_RESYNC_INTERVAL);
        }
        Duration::from_secs(self.resync_interval.unwrap_or(DEFAULT_RESYNC_INTERVAL))
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_secs(self.retry_backoff.unwrap_or(DEFAULT_RETRY_BACKOFF))
    }

    pub fn render_interval(&self) -> Duration {
        Duration::from_secs(self.render_interval.unwrap_or(DEFAULT_RENDER_INTERVAL))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT))
    }

    pub fn orientation(&self) -> Orientation {
        Orientation::from_degrees(self.rotation.unwrap_or(DEFAULT_ROTATION))
            .unwrap_or(Orientation::Landscape0)
    }

    /// Log the effective settings.
    pub fn log_config(&self) {
        let source = match get_custom_config_dir() {
            Some(dir) => format!(
                "configuration from {}",
                crate::common::utils::private_path(&dir)
            ),
            None => "default configuration".to_string(),
        };
        log_block_start!("Loaded {}", source);

        if self.is_demo() {
            log_indented!("Demo mode: walking through the week offline");
        } else {
            let location = self.timezone.as_deref().unwrap_or("located by IP");
            log_indented!(
                "Time provider: {} ({})",
                self.time_provider_kind().as_str(),
                location
            );
        }
        log_indented!(
            "Clock: {}-hour, rotation {}°",
            if self.twelve_hour() { 12 } else { 24 },
            self.orientation().degrees()
        );
        log_indented!(
            "Resync every {}s, retry backoff {}s",
            self.resync_interval().as_secs(),
            self.retry_backoff().as_secs()
        );
        log_indented!(
            "Render every {}s, request timeout {}s",
            self.render_interval().as_secs(),
            self.request_timeout().as_secs()
        );
    }
}
