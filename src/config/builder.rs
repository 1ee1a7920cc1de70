//! Default configuration file creation.
//!
//! The default file is assembled with [`ConfigBuilder`] so settings and their
//! comments line up in columns.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::common::constants::*;
use crate::common::utils::private_path;

/// Write a commented default `garbage-clock.toml` to `path`, creating parent directories.
pub fn create_default_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    let content = default_config_content();
    fs::write(path, content)
        .with_context(|| format!("Failed to write default config to {}", private_path(path)))?;

    log_block_start!("Created default configuration");
    log_indented!("{}", private_path(path));
    Ok(())
}

fn default_config_content() -> String {
    let quoted = |value: &str| format!("\"{value}\"");

    let content = ConfigBuilder::new()
        .add_section("Time service")
        .add_setting(
            "time_provider",
            &quoted(DEFAULT_TIME_PROVIDER),
            "\"worldtimeapi\" or \"adafruit_io\"",
        )
        .add_setting(
            "time_api_url",
            &quoted(DEFAULT_WORLDTIMEAPI_URL),
            "Base URL of the time service",
        )
        .add_disabled_setting(
            "timezone",
            "\"America/New_York\"",
            "IANA time zone name; omit to locate by IP",
        )
        .add_disabled_setting("aio_username", "\"\"", "Adafruit IO user (adafruit_io only)")
        .add_disabled_setting("aio_key", "\"\"", "Adafruit IO key (adafruit_io only)")
        .add_section("Display")
        .add_setting(
            "twelve_hour",
            &DEFAULT_TWELVE_HOUR.to_string(),
            "12-hour clock without leading zero",
        )
        .add_setting(
            "rotation",
            &DEFAULT_ROTATION.to_string(),
            "Panel rotation: 0, 90, 180 or 270",
        )
        .add_setting(
            "demo",
            &DEFAULT_DEMO.to_string(),
            "Walk through the week offline",
        )
        .add_section("Timing")
        .add_setting(
            "resync_interval",
            &DEFAULT_RESYNC_INTERVAL.to_string(),
            &format!("Seconds between syncs ({MINIMUM_RESYNC_INTERVAL}-{MAXIMUM_RESYNC_INTERVAL})"),
        )
        .add_setting(
            "retry_backoff",
            &DEFAULT_RETRY_BACKOFF.to_string(),
            &format!(
                "Seconds added after a failed sync ({MINIMUM_RETRY_BACKOFF}-{MAXIMUM_RETRY_BACKOFF})"
            ),
        )
        .add_setting(
            "render_interval",
            &DEFAULT_RENDER_INTERVAL.to_string(),
            &format!("Seconds between frames ({MINIMUM_RENDER_INTERVAL}-{MAXIMUM_RENDER_INTERVAL})"),
        )
        .add_setting(
            "request_timeout",
            &DEFAULT_REQUEST_TIMEOUT.to_string(),
            &format!(
                "HTTP timeout in seconds ({MINIMUM_REQUEST_TIMEOUT}-{MAXIMUM_REQUEST_TIMEOUT})"
            ),
        )
        .build();

    format!("{content}\n")
}

struct ConfigBuilder {
    entries: Vec<ConfigEntry>,
}

enum ConfigEntry {
    Section(String),
    Setting { line: String, comment: String },
}

impl ConfigBuilder {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn add_section(mut self, title: &str) -> Self {
        self.entries.push(ConfigEntry::Section(format!("#[{title}]")));
        self
    }

    fn add_setting(mut self, key: &str, value: &str, comment: &str) -> Self {
        self.entries.push(ConfigEntry::Setting {
            line: format!("{key} = {value}"),
            comment: format!("# {comment}"),
        });
        self
    }

    /// A setting written commented out, as a hint.
    fn add_disabled_setting(mut self, key: &str, value: &str, comment: &str) -> Self {
        self.entries.push(ConfigEntry::Setting {
            line: format!("# {key} = {value}"),
            comment: format!("# {comment}"),
        });
        self
    }

    fn build(self) -> String {
        let max_width = self
            .entries
            .iter()
            .filter_map(|entry| match entry {
                ConfigEntry::Setting { line, .. } => Some(line.len()),
                ConfigEntry::Section(_) => None,
            })
            .max()
            .unwrap_or(0)
            + 1;

        let mut result = Vec::new();
        for entry in self.entries {
            match entry {
                ConfigEntry::Section(title) => {
                    if !result.is_empty() {
                        result.push(String::new());
                    }
                    result.push(title);
                }
                ConfigEntry::Setting { line, comment } => {
                    let padding = " ".repeat(max_width - line.len());
                    result.push(format!("{line}{padding}{comment}"));
                }
            }
        }

        result.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_content_parses_to_defaults() {
        let config: crate::config::Config = toml::from_str(&default_config_content()).unwrap();

        assert_eq!(config.timezone, None);
        assert_eq!(config.aio_key, None);
        assert_eq!(config.resync_interval, Some(DEFAULT_RESYNC_INTERVAL));
        assert_eq!(config.rotation, Some(DEFAULT_ROTATION));
        assert_eq!(config.twelve_hour, Some(true));
        assert!(crate::config::validation::validate_config(&config).is_ok());
    }

    #[test]
    fn test_comments_are_aligned() {
        let content = default_config_content();
        let columns: Vec<usize> = content
            .lines()
            .filter(|line| !line.starts_with("#[") && !line.is_empty())
            .map(|line| line.rfind(" # ").unwrap_or_default())
            .collect();
        assert!(columns.windows(2).all(|w| w[0] == w[1]), "{content}");
    }
}
