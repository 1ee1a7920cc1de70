//! Configuration validation functionality.
//!
//! Every check names the offending field so the error can be fixed from the
//! message alone.

use anyhow::Result;

use super::{Config, TimeProviderKind};
use crate::common::constants::*;

/// Validate all configured values.
pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(timezone) = config.timezone.as_deref()
        && timezone.parse::<chrono_tz::Tz>().is_err()
    {
        anyhow::bail!(
            "timezone '{}' is not a known IANA time zone name (e.g. \"America/New_York\")",
            timezone
        );
    }

    if let Some(url) = config.time_api_url.as_deref()
        && !(url.starts_with("http://") || url.starts_with("https://"))
    {
        anyhow::bail!("time_api_url '{}' must start with http:// or https://", url);
    }

    if config.time_provider == Some(TimeProviderKind::AdafruitIo) && !config.is_demo() {
        for (field, value) in [
            ("aio_username", &config.aio_username),
            ("aio_key", &config.aio_key),
        ] {
            if value.as_deref().is_none_or(|v| v.trim().is_empty()) {
                anyhow::bail!("time_provider \"adafruit_io\" requires {} to be set", field);
            }
        }
    }

    validate_range(
        "resync_interval",
        config.resync_interval,
        MINIMUM_RESYNC_INTERVAL,
        MAXIMUM_RESYNC_INTERVAL,
    )?;
    validate_range(
        "retry_backoff",
        config.retry_backoff,
        MINIMUM_RETRY_BACKOFF,
        MAXIMUM_RETRY_BACKOFF,
    )?;
    validate_range(
        "render_interval",
        config.render_interval,
        MINIMUM_RENDER_INTERVAL,
        MAXIMUM_RENDER_INTERVAL,
    )?;
    validate_range(
        "request_timeout",
        config.request_timeout,
        MINIMUM_REQUEST_TIMEOUT,
        MAXIMUM_REQUEST_TIMEOUT,
    )?;

    if let Some(rotation) = config.rotation
        && !VALID_ROTATIONS.contains(&rotation)
    {
        anyhow::bail!(
            "rotation ({}) must be one of 0, 90, 180 or 270 degrees",
            rotation
        );
    }

    Ok(())
}

fn validate_range(field: &str, value: Option<u64>, min: u64, max: u64) -> Result<()> {
    if let Some(seconds) = value
        && !(min..=max).contains(&seconds)
    {
        anyhow::bail!(
            "{} ({} s) must be between {} and {} seconds",
            field,
            seconds,
            min,
            max
        );
    }
    Ok(())
}
