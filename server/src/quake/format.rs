//! Alert message rendering.

use chrono::{DateTime, Utc};

use super::jst;
use super::types::QuakeEvent;

/// Placeholder for fields the feed left empty.
const UNKNOWN: &str = "不明";

/// Render the push message for an event.
///
/// ```
/// use quake_bot::quake::{format_message, QuakeEvent};
///
/// let event = QuakeEvent {
///     id: "us7000abcd".into(),
///     magnitude: Some(5.2),
///     place: Some("off the coast".into()),
///     occurred_at_ms: 1_700_000_000_000,
/// };
/// assert_eq!(
///     format_message(&event),
///     "🌏地震速報\nマグニチュード: 5.2\n場所: off the coast\n発生時刻: 11/15 07:13 JST"
/// );
/// ```
pub fn format_message(event: &QuakeEvent) -> String {
    let magnitude = event
        .magnitude
        .map_or_else(|| UNKNOWN.to_string(), format_magnitude);
    let place = event.place.as_deref().unwrap_or(UNKNOWN);
    let time = format_local_time(event.occurred_at_ms);

    format!("🌏地震速報\nマグニチュード: {magnitude}\n場所: {place}\n発生時刻: {time} JST")
}

/// Magnitudes always carry a decimal digit, so `5.0` stays `5.0`.
fn format_magnitude(magnitude: f64) -> String {
    if magnitude.is_finite() && magnitude.fract() == 0.0 {
        format!("{magnitude:.1}")
    } else {
        magnitude.to_string()
    }
}

/// `MM/DD HH:MM` in JST.
fn format_local_time(epoch_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(epoch_ms).map_or_else(
        || UNKNOWN.to_string(),
        |utc| utc.with_timezone(&jst()).format("%m/%d %H:%M").to_string(),
    )
}
