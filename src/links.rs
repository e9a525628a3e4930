//! URL helpers for user-facing bookmark links.
//!
//! Pure string builders for the links a rendered bookmark needs: the author's
//! profile icon, the author's bookmark page, and the dated permalink of one
//! bookmark on an entry. Rendering itself is the presentation layer's job.

use chrono::{DateTime, Utc};

/// Profile icon for a user.
pub fn icon_url(user: &str) -> String {
    format!("https://cdn.profile-image.st-hatena.com/users/{user}/profile.png")
}

/// A user's bookmark page.
pub fn user_page_url(user: &str) -> String {
    format!("https://b.hatena.ne.jp/{user}/")
}

/// Permalink of one bookmark on an entry.
///
/// The path carries the bookmark's own calendar date as `yyyymmdd` and the
/// entry id as the fragment.
pub fn bookmark_permalink(user: &str, timestamp: DateTime<Utc>, eid: &str) -> String {
    format!(
        "https://b.hatena.ne.jp/{user}/{}#bookmark-{eid}",
        timestamp.format("%Y%m%d")
    )
}
