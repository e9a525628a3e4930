//! Output data structures for the thread builder.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::mention::TextSegment;

/// One bookmark in the assembled result.
///
/// A node with segments is a *commented* node and lives in the forest, either
/// as a root or as one root's child. A node without segments is a *silent*
/// node (bookmark with no comment); it never carries children and is reported
/// through [`ThreadForest::silent`] instead of the forest.
///
/// Nodes are built once per call and owned exclusively by the result that
/// contains them; nothing is shared or mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThreadNode {
    /// Bookmark author.
    pub user: String,

    /// When the bookmark was created.
    pub timestamp: DateTime<Utc>,

    /// Relative-age label against the build's reference instant.
    pub age_label: String,

    /// Tokenized comment text; empty for silent nodes.
    pub segments: Vec<TextSegment>,

    /// User named by the comment's first mention, if any. Kept even when it
    /// did not resolve to a node in the batch.
    pub reply_to: Option<String>,

    /// Direct replies, in input order. Only ever populated on roots.
    pub children: Vec<ThreadNode>,
}

impl ThreadNode {
    /// Create a commented node with no children attached yet.
    pub fn commented(
        user: String,
        timestamp: DateTime<Utc>,
        age_label: String,
        segments: Vec<TextSegment>,
        reply_to: Option<String>,
    ) -> Self {
        ThreadNode {
            user,
            timestamp,
            age_label,
            segments,
            reply_to,
            children: Vec::new(),
        }
    }

    /// Create a silent node (bookmark without a comment).
    pub fn silent(user: String, timestamp: DateTime<Utc>, age_label: String) -> Self {
        ThreadNode {
            user,
            timestamp,
            age_label,
            segments: Vec::new(),
            reply_to: None,
            children: Vec::new(),
        }
    }

    /// Whether this node carries comment text.
    pub fn is_commented(&self) -> bool {
        !self.segments.is_empty()
    }
}

/// Result of one forest build.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ThreadForest {
    /// Root comments in input order, each with its replies attached.
    pub forest: Vec<ThreadNode>,

    /// Bookmarks without comment text, in input order.
    pub silent: Vec<ThreadNode>,
}

impl ThreadForest {
    /// Total number of commented nodes across roots and children.
    pub fn commented_count(&self) -> usize {
        self.forest
            .iter()
            .map(|root| 1 + root.children.len())
            .sum()
    }
}
