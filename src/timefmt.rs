//! Relative-age label formatting.
//!
//! Bookmark timestamps are displayed as a compact age relative to a reference
//! instant: seconds under a minute, minutes under an hour, hours under a day,
//! and a plain calendar date beyond that. The reference instant is always
//! supplied by the caller so results stay deterministic and replayable.

use chrono::{DateTime, Datelike, Utc};

/// Format the age of `event` relative to `now`.
///
/// ## Buckets
///
/// Evaluated in order, first match wins:
///
/// - under 60 seconds: `"42s"`
/// - under 60 minutes: `"5m"`
/// - under 24 hours: `"13h"`
/// - otherwise: `"2024/5/1"` from the event's own calendar fields
///   (1-based month and day, no zero padding)
///
/// An `event` slightly in the future (clock skew between the API and the
/// caller) clamps to `"0s"` rather than erroring.
pub fn age_label(now: DateTime<Utc>, event: DateTime<Utc>) -> String {
    let diff = (now - event).num_seconds().max(0);

    if diff < 60 {
        format!("{diff}s")
    } else if diff < 3600 {
        format!("{}m", diff / 60)
    } else if diff < 86_400 {
        format!("{}h", diff / 3600)
    } else {
        format!("{}/{}/{}", event.year(), event.month(), event.day())
    }
}
