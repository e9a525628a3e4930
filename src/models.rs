use serde::{Deserialize, Serialize};

// ===== jsonlite Entry Payload =====

/// One user's bookmark on an entry, as delivered by the jsonlite API.
///
/// `user` is unique within a batch (the API stores one bookmark per user per
/// entry). `timestamp` is kept in the source's string form; parsing it into a
/// `DateTime<Utc>` happens during the forest build and is the one step that
/// can fail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawBookmark {
    pub user: String,
    #[serde(default)]
    pub comment: String,
    pub timestamp: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// The jsonlite entry envelope: entry metadata plus the full bookmark batch.
///
/// The API delivers the whole batch in one response; there is no pagination.
/// Fields the crate does not consume (title, screenshot, ...) are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntrySnapshot {
    pub count: i64,
    pub eid: String,
    pub entry_url: String,
    #[serde(default)]
    pub bookmarks: Vec<RawBookmark>,
}
