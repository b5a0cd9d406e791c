//! Earthquake Feed
//!
//! Fetching recent events from USGS and rendering them as alert text.

pub mod format;
pub mod source;
pub mod types;

use chrono::FixedOffset;

pub use format::format_message;
pub use source::{EventSource, UsgsClient};
pub use types::{FetchError, QuakeEvent};

/// Offset of Japan Standard Time from UTC, in seconds.
const JST_OFFSET_SECS: i32 = 9 * 3600;

/// Japan Standard Time (UTC+9), the zone alerts are written in.
pub fn jst() -> FixedOffset {
    FixedOffset::east_opt(JST_OFFSET_SECS).expect("UTC+9 is a valid offset")
}
