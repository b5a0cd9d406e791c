//! Earthquake event types and the USGS GeoJSON wire format.

use serde::Deserialize;

/// A single earthquake observation as reported by the event feed.
#[derive(Debug, Clone, PartialEq)]
pub struct QuakeEvent {
    /// Upstream event id, unique per event.
    pub id: String,
    /// Reported magnitude, if any.
    pub magnitude: Option<f64>,
    /// Human-readable location, if any.
    pub place: Option<String>,
    /// Origin time in milliseconds since the Unix epoch (UTC).
    pub occurred_at_ms: i64,
}

/// Errors returned by an [`EventSource`](super::EventSource).
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream returned HTTP {0}")]
    Status(u16),

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// GeoJSON `FeatureCollection` returned by `format=geojson`.
#[derive(Debug, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

/// One GeoJSON feature. Only the fields the bot reads are decoded.
#[derive(Debug, Deserialize)]
pub struct Feature {
    pub id: String,
    pub properties: FeatureProperties,
}

#[derive(Debug, Deserialize)]
pub struct FeatureProperties {
    #[serde(default)]
    pub mag: Option<f64>,
    #[serde(default)]
    pub place: Option<String>,
    pub time: i64,
}

impl From<Feature> for QuakeEvent {
    fn from(feature: Feature) -> Self {
        Self {
            id: feature.id,
            magnitude: feature.properties.mag,
            place: feature.properties.place,
            occurred_at_ms: feature.properties.time,
        }
    }
}
