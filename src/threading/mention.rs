//! Mention scanning and comment tokenization.
//!
//! Reply targets are embedded in free comment text as `id:<name>` tokens.
//! Scanning splits a comment into alternating plain/mention segments at token
//! boundaries so the presentation layer can decide how to render each kind.
//! Every character of the input lands in exactly one segment.

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// Lazy-initialized regex for matching inline mentions
static MENTION_REGEX: OnceLock<Regex> = OnceLock::new();

/// Get the compiled mention regex
///
/// Matches the literal prefix `id:` followed by one or more user-name
/// characters (ASCII letters, digits, underscore, hyphen), e.g. `id:alice`
/// or `id:b-2_reader`.
fn mention_regex() -> &'static Regex {
    MENTION_REGEX
        .get_or_init(|| Regex::new(r"id:[A-Za-z0-9_-]+").expect("Invalid mention regex"))
}

/// One token of a scanned comment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TextSegment {
    /// Free text between mentions.
    Plain { text: String },
    /// An `id:<name>` mention. `user` is the name after the prefix and `raw`
    /// is the matched text as written, kept for display reuse.
    Mention { user: String, raw: String },
}

impl TextSegment {
    /// The segment's text exactly as it appeared in the comment.
    pub fn text(&self) -> &str {
        match self {
            TextSegment::Plain { text } => text,
            TextSegment::Mention { raw, .. } => raw,
        }
    }
}

/// Split a comment into plain/mention segments.
///
/// Concatenating `text()` over the result reproduces the input exactly;
/// empty plain runs between adjacent mentions are not emitted.
///
/// ## Examples
///
/// ```rust
/// use hatebu_threads::threading::{TextSegment, scan_segments};
///
/// let segments = scan_segments("id:alice same here");
/// assert_eq!(
///     segments,
///     vec![
///         TextSegment::Mention {
///             user: "alice".to_string(),
///             raw: "id:alice".to_string(),
///         },
///         TextSegment::Plain {
///             text: " same here".to_string(),
///         },
///     ]
/// );
/// ```
pub fn scan_segments(comment: &str) -> Vec<TextSegment> {
    let re = mention_regex();
    let mut segments = Vec::new();
    let mut scanned_to = 0;

    for m in re.find_iter(comment) {
        if m.start() > scanned_to {
            segments.push(TextSegment::Plain {
                text: comment[scanned_to..m.start()].to_string(),
            });
        }

        let raw = m.as_str();
        segments.push(TextSegment::Mention {
            user: raw["id:".len()..].to_string(),
            raw: raw.to_string(),
        });

        scanned_to = m.end();
    }

    if scanned_to < comment.len() {
        segments.push(TextSegment::Plain {
            text: comment[scanned_to..].to_string(),
        });
    }

    segments
}

/// The user named by the first mention in a segment sequence, if any.
///
/// Later mentions stay in the segment list for display but only the first one
/// targets a reply.
pub fn first_mention(segments: &[TextSegment]) -> Option<&str> {
    segments.iter().find_map(|segment| match segment {
        TextSegment::Mention { user, .. } => Some(user.as_str()),
        TextSegment::Plain { .. } => None,
    })
}
