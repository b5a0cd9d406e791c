//! USGS event feed adapter.

use async_trait::async_trait;
use chrono::{DateTime, Duration, FixedOffset, SecondsFormat, Utc};
use tracing::debug;

use super::types::{FeatureCollection, FetchError, QuakeEvent};
use super::jst;
use crate::config::{Config, DEFAULT_LOOKBACK_MINUTES};

/// Source of recent earthquake events.
///
/// Implementations return events sorted newest first by origin time.
#[async_trait]
pub trait EventSource: Send + Sync {
    async fn fetch_recent(&self) -> Result<Vec<QuakeEvent>, FetchError>;
}

/// Queries the USGS FDSN event service for recent, magnitude-filtered events.
#[derive(Clone)]
pub struct UsgsClient {
    http: reqwest::Client,
    url: String,
    min_magnitude: f64,
    lookback: Duration,
}

impl UsgsClient {
    /// Create a client from configuration. `http` should already carry the
    /// outbound timeout.
    #[must_use]
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            url: config.usgs_url.clone(),
            min_magnitude: config.min_magnitude,
            lookback: Duration::try_minutes(config.lookback_minutes)
                .unwrap_or_else(default_lookback),
        }
    }

    /// Query parameters for a fetch issued at `now`.
    ///
    /// The start time is rendered in JST, matching the zone the alerts are
    /// written in.
    pub fn query_params(&self, now: DateTime<Utc>) -> Vec<(&'static str, String)> {
        vec![
            ("format", "geojson".to_string()),
            ("starttime", start_time(now, self.lookback, jst())),
            ("minmagnitude", self.min_magnitude.to_string()),
        ]
    }
}

#[async_trait]
impl EventSource for UsgsClient {
    async fn fetch_recent(&self) -> Result<Vec<QuakeEvent>, FetchError> {
        let params = self.query_params(Utc::now());

        let response = self.http.get(&self.url).query(&params).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let collection: FeatureCollection = serde_json::from_slice(&body)?;

        let events = newest_first(collection.features.into_iter().map(Into::into).collect());
        debug!(count = events.len(), "Fetched recent quake events");
        Ok(events)
    }
}

/// Window used when the configured lookback cannot be represented.
fn default_lookback() -> Duration {
    Duration::minutes(DEFAULT_LOOKBACK_MINUTES)
}

/// RFC 3339 timestamp of `now - lookback` in the given zone, second precision.
///
/// A lookback reaching past chrono's range falls back to the default window.
fn start_time(now: DateTime<Utc>, lookback: Duration, zone: FixedOffset) -> String {
    now.checked_sub_signed(lookback)
        .unwrap_or_else(|| now - default_lookback())
        .with_timezone(&zone)
        .to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// Sort events newest first. Stable, so equal timestamps keep upstream order.
pub fn newest_first(mut events: Vec<QuakeEvent>) -> Vec<QuakeEvent> {
    events.sort_by(|a, b| b.occurred_at_ms.cmp(&a.occurred_at_ms));
    events
}
