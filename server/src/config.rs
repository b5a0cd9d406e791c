//! Server Configuration
//!
//! Loads configuration from environment variables.

use anyhow::{Context, Result};
use std::env;

/// Default USGS FDSN event query endpoint.
pub const DEFAULT_USGS_URL: &str = "https://earthquake.usgs.gov/fdsnws/event/1/query";

/// Default query window, in minutes.
pub const DEFAULT_LOOKBACK_MINUTES: i64 = 10;

/// Longest accepted query window (one week), in minutes.
pub const MAX_LOOKBACK_MINUTES: i64 = 7 * 24 * 60;

/// Default LINE Messaging API base URL.
pub const DEFAULT_LINE_API_BASE: &str = "https://api.line.me";

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:8080")
    pub bind_address: String,

    /// LINE channel access token (Bearer credential for push/reply)
    pub line_channel_access_token: String,

    /// LINE channel secret (HMAC key for webhook signatures)
    pub line_channel_secret: String,

    /// Push recipient. `None` until the user has discovered their id via the
    /// `id` command and configured it.
    pub target_user_id: Option<String>,

    /// Path of the file holding the last notified event id
    pub state_file: String,

    /// USGS event query endpoint
    pub usgs_url: String,

    /// LINE API base URL (overridable for local testing)
    pub line_api_base: String,

    /// Minimum magnitude passed to the event query (default: 3.5)
    pub min_magnitude: f64,

    /// How far back the event query looks, in minutes (default: 10, max: one week)
    pub lookback_minutes: i64,

    /// Timeout for every outbound HTTP call, in seconds (default: 15)
    pub http_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            line_channel_access_token: env::var("LINE_CHANNEL_ACCESS_TOKEN")
                .context("LINE_CHANNEL_ACCESS_TOKEN must be set")?,
            line_channel_secret: env::var("LINE_CHANNEL_SECRET")
                .context("LINE_CHANNEL_SECRET must be set")?,
            target_user_id: env::var("TARGET_USER_ID")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            state_file: env::var("STATE_FILE").unwrap_or_else(|_| "last_id.txt".into()),
            usgs_url: env::var("USGS_URL").unwrap_or_else(|_| DEFAULT_USGS_URL.into()),
            line_api_base: env::var("LINE_API_BASE")
                .unwrap_or_else(|_| DEFAULT_LINE_API_BASE.into()),
            min_magnitude: env::var("QUAKE_MIN_MAGNITUDE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3.5),
            lookback_minutes: env::var("QUAKE_LOOKBACK_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|m| (1..=MAX_LOOKBACK_MINUTES).contains(m))
                .unwrap_or(DEFAULT_LOOKBACK_MINUTES),
            http_timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(15),
        })
    }

    /// Check if a push recipient is configured.
    #[must_use]
    pub const fn has_recipient(&self) -> bool {
        self.target_user_id.is_some()
    }

    /// Create a default configuration for testing.
    ///
    /// Points both upstreams at an unroutable local port so an accidental
    /// real call fails fast instead of reaching the internet.
    #[must_use]
    pub fn default_for_test() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".into(),
            line_channel_access_token: "test-token".into(),
            line_channel_secret: "test-channel-secret".into(),
            target_user_id: Some("U0123456789abcdef".into()),
            state_file: "last_id.txt".into(),
            usgs_url: "http://127.0.0.1:9/query".into(),
            line_api_base: "http://127.0.0.1:9".into(),
            min_magnitude: 3.5,
            lookback_minutes: DEFAULT_LOOKBACK_MINUTES,
            http_timeout_secs: 15,
        }
    }
}
