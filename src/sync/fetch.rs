//! Network fetch primitive used by the sync service.

use anyhow::{Context, Result, anyhow};
use reqwest::blocking::Client;
use std::time::Duration;

const CONNECT_TIMEOUT_SECS: u64 = 5;

/// Fetch a URL and return the response body.
#[cfg_attr(test, mockall::automock)]
pub trait TimeFetcher {
    fn fetch(&mut self, url: &str) -> Result<String>;
}

/// Blocking HTTP(S) fetcher with a bounded request time.
pub struct HttpFetcher {
    client: Client,
    debug_enabled: bool,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, debug_enabled: bool) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS).min(timeout))
            .user_agent(concat!("garbage-clock/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            client,
            debug_enabled,
        })
    }
}

impl TimeFetcher for HttpFetcher {
    fn fetch(&mut self, url: &str) -> Result<String> {
        let shown = redact_url(url);
        if self.debug_enabled {
            log_debug!("GET {}", shown);
        }

        let response = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("GET {shown} send failed"))?;
        let status = response.status();
        let body = response
            .text()
            .context("failed reading response body")?;

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(anyhow!("GET {shown} rate limited ({status})"));
        }
        if !status.is_success() {
            return Err(anyhow!("GET {shown} failed: {status} {}", body.trim()));
        }

        Ok(body)
    }
}

/// Replace the value of an `x-aio-key` query parameter so keys never reach the log.
pub fn redact_url(url: &str) -> String {
    const KEY_PARAM: &str = "x-aio-key=";
    let Some(start) = url.find(KEY_PARAM).map(|i| i + KEY_PARAM.len()) else {
        return url.to_string();
    };
    let end = url[start..].find('&').map_or(url.len(), |i| start + i);
    format!("{}***{}", &url[..start], &url[end..])
}
