//! Core forest-building algorithm.
//!
//! Turns one entry's flat bookmark batch into a two-level reply forest:
//!
//! 1. Parse every timestamp and tokenize every comment (any timestamp failure
//!    aborts the whole build)
//! 2. Index commented nodes by author in one mutable pass
//! 3. Resolve each node's first mention against the index
//! 4. Emit roots in input order, with each root's replies attached in input
//!    order; silent bookmarks come back as a separate ordered list
//!
//! A mention that names an absent author, or the node's own author, is not an
//! error: the node simply stays a root. Replies to non-root comments flatten
//! up to the target's root so the forest never nests deeper than one level.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::RawBookmark;
use crate::timefmt::age_label;

use super::mention::{first_mention, scan_segments};
use super::node::{ThreadForest, ThreadNode};

/// Errors that can abort a forest build.
#[derive(Debug, Error)]
pub enum ThreadError {
    #[error("malformed timestamp `{raw}` for bookmark by {user}: {error}")]
    MalformedTimestamp {
        user: String,
        raw: String,
        error: String,
    },
}

/// Build the reply forest for one bookmark batch.
///
/// The caller supplies `now` explicitly; the build never consults an ambient
/// clock, so identical inputs always produce identical output. The batch is
/// consumed read-only and the result owns every node it returns.
///
/// ## Returns
///
/// A [`ThreadForest`] whose `forest` holds every commented bookmark exactly
/// once (as a root or as one root's child) and whose `silent` holds every
/// comment-less bookmark, both in input order.
///
/// ## Errors
///
/// [`ThreadError::MalformedTimestamp`] if any record's timestamp cannot be
/// parsed. Nothing partial is returned; retrying a pure build would only
/// reproduce the failure.
pub fn build_forest(
    records: &[RawBookmark],
    now: DateTime<Utc>,
) -> Result<ThreadForest, ThreadError> {
    // Step 1: parse timestamps, tokenize comments, split commented from silent.
    // Both partitions keep input order.
    let mut commented: Vec<ThreadNode> = Vec::new();
    let mut silent: Vec<ThreadNode> = Vec::new();

    for record in records {
        let timestamp = parse_timestamp(&record.user, &record.timestamp)?;
        let label = age_label(now, timestamp);

        if record.comment.is_empty() {
            silent.push(ThreadNode::silent(record.user.clone(), timestamp, label));
        } else {
            let segments = scan_segments(&record.comment);
            let reply_to = first_mention(&segments).map(str::to_string);
            commented.push(ThreadNode::commented(
                record.user.clone(),
                timestamp,
                label,
                segments,
                reply_to,
            ));
        }
    }

    // Step 2: index nodes by author. The API stores one bookmark per user per
    // entry; if a batch violates that anyway, the later record wins the entry.
    let mut by_user: HashMap<&str, usize> = HashMap::new();
    for (idx, node) in commented.iter().enumerate() {
        if by_user.insert(node.user.as_str(), idx).is_some() {
            log::warn!(
                "duplicate bookmark author '{}' in batch, indexing the later record",
                node.user
            );
        }
    }

    // Step 3: resolve each node's first mention to a tentative parent.
    // Self-references and absent authors leave the node a root.
    let parents: Vec<Option<usize>> = commented
        .iter()
        .enumerate()
        .map(|(idx, node)| {
            node.reply_to
                .as_deref()
                .and_then(|user| by_user.get(user).copied())
                .filter(|&target| target != idx)
        })
        .collect();

    // Step 4: flatten every reply chain to its root ancestor so the forest
    // stays two levels deep. A chain that cycles back on itself never reaches
    // a root; the node falls back to root placement.
    let attach_to: Vec<Option<usize>> = (0..commented.len())
        .map(|idx| resolve_root_ancestor(idx, &parents))
        .collect();

    // Step 5: move children under their roots, then emit roots in input order.
    let mut slots: Vec<Option<ThreadNode>> = commented.into_iter().map(Some).collect();
    let mut children_of: HashMap<usize, Vec<ThreadNode>> = HashMap::new();

    for idx in 0..slots.len() {
        if let Some(root_idx) = attach_to[idx] {
            if let Some(node) = slots[idx].take() {
                children_of.entry(root_idx).or_default().push(node);
            }
        }
    }

    let mut forest = Vec::new();
    for (idx, slot) in slots.iter_mut().enumerate() {
        if let Some(mut node) = slot.take() {
            if let Some(children) = children_of.remove(&idx) {
                node.children = children;
            }
            forest.push(node);
        }
    }

    log::debug!(
        "built forest: {} roots, {} replies, {} silent",
        forest.len(),
        forest.iter().map(|root| root.children.len()).sum::<usize>(),
        silent.len()
    );

    Ok(ThreadForest { forest, silent })
}

/// Walk a node's parent chain up to its root ancestor.
///
/// Returns `None` when the node is itself a root, either because it has no
/// parent or because its chain revisits a node (a mention cycle among
/// non-roots, which can never reach a root).
fn resolve_root_ancestor(idx: usize, parents: &[Option<usize>]) -> Option<usize> {
    let mut visited = HashSet::new();
    visited.insert(idx);

    let mut current = parents[idx]?;
    loop {
        // If we've seen this node before, we have a cycle
        if !visited.insert(current) {
            return None;
        }

        match parents[current] {
            Some(next) => current = next,
            None => return Some(current),
        }
    }
}

/// Parse one bookmark timestamp into an instant.
///
/// The jsonlite API emits `yyyy/mm/dd hh:mm:ss` strings; parsing is lenient
/// about the exact shape and treats naive datetimes as UTC so builds stay
/// deterministic across host timezones.
fn parse_timestamp(user: &str, raw: &str) -> Result<DateTime<Utc>, ThreadError> {
    dateparser::parse_with_timezone(raw, &Utc).map_err(|source| ThreadError::MalformedTimestamp {
        user: user.to_string(),
        raw: raw.to_string(),
        error: source.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn record(user: &str, comment: &str, timestamp: &str) -> RawBookmark {
        RawBookmark {
            user: user.to_string(),
            comment: comment.to_string(),
            timestamp: timestamp.to_string(),
            tags: Vec::new(),
        }
    }

    fn base_time() -> DateTime<Utc> {
        "2024-05-10T12:00:00Z".parse().expect("valid RFC 3339")
    }

    #[test]
    fn test_reply_attaches_under_root_with_labels() {
        let records = vec![
            record("alice", "first!", "2024-05-10T12:00:00Z"),
            record("bob", "id:alice same here", "2024-05-10T12:00:00Z"),
            record("carol", "", "2024-05-10T12:00:00Z"),
        ];
        let now = base_time() + Duration::seconds(90);

        let result = build_forest(&records, now).expect("build succeeds");

        assert_eq!(result.forest.len(), 1);
        let root = &result.forest[0];
        assert_eq!(root.user, "alice");
        assert_eq!(root.age_label, "1m");
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].user, "bob");
        assert_eq!(root.children[0].age_label, "1m");
        assert_eq!(root.children[0].reply_to.as_deref(), Some("alice"));

        assert_eq!(result.silent.len(), 1);
        assert_eq!(result.silent[0].user, "carol");
        assert!(result.silent[0].segments.is_empty());
        assert!(result.silent[0].children.is_empty());
    }

    #[test]
    fn test_dangling_mention_becomes_root() {
        let records = vec![record("alice", "id:nobody hi", "2024-05-10T12:00:00Z")];

        let result = build_forest(&records, base_time()).expect("build succeeds");

        assert_eq!(result.forest.len(), 1);
        assert_eq!(result.forest[0].user, "alice");
        assert!(result.forest[0].children.is_empty());
        // The mention is still parsed and kept on the node
        assert_eq!(result.forest[0].reply_to.as_deref(), Some("nobody"));
    }

    #[test]
    fn test_self_mention_becomes_root() {
        let records = vec![record("alice", "id:alice note to self", "2024-05-10T12:00:00Z")];

        let result = build_forest(&records, base_time()).expect("build succeeds");

        assert_eq!(result.forest.len(), 1);
        assert_eq!(result.forest[0].user, "alice");
        assert!(result.forest[0].children.is_empty());
    }

    #[test]
    fn test_reply_chain_flattens_to_root() {
        let records = vec![
            record("alice", "first!", "2024-05-10T12:00:00Z"),
            record("bob", "id:alice agreed", "2024-05-10T12:00:00Z"),
            record("carol", "id:bob me too", "2024-05-10T12:00:00Z"),
        ];

        let result = build_forest(&records, base_time()).expect("build succeeds");

        assert_eq!(result.forest.len(), 1);
        let root = &result.forest[0];
        assert_eq!(root.user, "alice");
        let children: Vec<&str> = root.children.iter().map(|c| c.user.as_str()).collect();
        assert_eq!(children, vec!["bob", "carol"]);
        // Children never nest further
        assert!(root.children.iter().all(|c| c.children.is_empty()));
    }

    #[test]
    fn test_mutual_mention_cycle_breaks_to_roots() {
        let records = vec![
            record("alice", "id:bob after you", "2024-05-10T12:00:00Z"),
            record("bob", "id:alice no, after you", "2024-05-10T12:00:00Z"),
        ];

        let result = build_forest(&records, base_time()).expect("build succeeds");

        let roots: Vec<&str> = result.forest.iter().map(|n| n.user.as_str()).collect();
        assert_eq!(roots, vec!["alice", "bob"]);
        assert!(result.forest.iter().all(|n| n.children.is_empty()));
    }

    #[test]
    fn test_first_mention_sets_reply_target() {
        let records = vec![
            record("alice", "first!", "2024-05-10T12:00:00Z"),
            record("bob", "also first", "2024-05-10T12:00:00Z"),
            record("carol", "id:bob and id:alice said it", "2024-05-10T12:00:00Z"),
        ];

        let result = build_forest(&records, base_time()).expect("build succeeds");

        let bob = result
            .forest
            .iter()
            .find(|n| n.user == "bob")
            .expect("bob is a root");
        assert_eq!(bob.children.len(), 1);
        assert_eq!(bob.children[0].user, "carol");
        // Both mentions survive in the segments
        assert_eq!(
            bob.children[0]
                .segments
                .iter()
                .filter(|s| matches!(s, crate::threading::TextSegment::Mention { .. }))
                .count(),
            2
        );
    }

    #[test]
    fn test_duplicate_author_later_record_wins_index() {
        let records = vec![
            record("dup", "earlier", "2024-05-10T11:00:00Z"),
            record("dup", "later", "2024-05-10T11:30:00Z"),
            record("alice", "id:dup replying", "2024-05-10T12:00:00Z"),
        ];

        let result = build_forest(&records, base_time()).expect("build succeeds");

        // Both duplicate records are emitted; the reply lands on the later one.
        assert_eq!(result.forest.len(), 2);
        assert!(result.forest[0].children.is_empty());
        assert_eq!(result.forest[1].children.len(), 1);
        assert_eq!(result.forest[1].children[0].user, "alice");
    }

    #[test]
    fn test_malformed_timestamp_aborts_whole_build() {
        let records = vec![
            record("alice", "fine", "2024-05-10T12:00:00Z"),
            record("bob", "broken clock", "not a timestamp"),
        ];

        let err = build_forest(&records, base_time()).expect_err("build fails");
        let ThreadError::MalformedTimestamp { user, raw, .. } = err;
        assert_eq!(user, "bob");
        assert_eq!(raw, "not a timestamp");
    }

    #[test]
    fn test_slash_format_timestamp_parses() {
        let records = vec![record("alice", "first!", "2024/05/09 13:00:00")];

        let result = build_forest(&records, base_time()).expect("build succeeds");

        assert_eq!(result.forest[0].age_label, "23h");
    }

    #[test]
    fn test_empty_batch_is_not_an_error() {
        let result = build_forest(&[], base_time()).expect("build succeeds");
        assert!(result.forest.is_empty());
        assert!(result.silent.is_empty());
    }

    #[test]
    fn test_silent_bookmarks_keep_input_order() {
        let records = vec![
            record("a", "", "2024-05-10T12:00:00Z"),
            record("b", "comment", "2024-05-10T12:00:00Z"),
            record("c", "", "2024-05-10T12:00:00Z"),
        ];

        let result = build_forest(&records, base_time()).expect("build succeeds");

        let silent: Vec<&str> = result.silent.iter().map(|n| n.user.as_str()).collect();
        assert_eq!(silent, vec!["a", "c"]);
    }
}
