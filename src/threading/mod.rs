//! Bookmark comment threading.
//!
//! Hatena Bookmark comments reply to each other with inline `id:<name>`
//! mentions rather than structured reply headers, and the entry API hands back
//! one flat, per-user bookmark list. This module rebuilds the conversation
//! from that list:
//!
//! 1. **Mention scanning**: each comment is split into plain/mention segments,
//!    and the first mention names the reply target
//! 2. **Author index**: a single-pass map from user name to node, relying on
//!    the API's one-bookmark-per-user contract
//! 3. **Forest assembly**: nodes with a resolvable target attach under that
//!    target's root, everything else becomes a root, and silent bookmarks
//!    (no comment) are reported separately
//!
//! The result is a two-level forest: roots and their direct children, both in
//! input order. Replies to non-root comments are flattened up one level so the
//! forest never nests deeper than one.
//!
//! ## Module Structure
//!
//! - `mention`: comment tokenization into plain/mention segments
//! - `node`: output data structures
//! - `builder`: the forest build itself

pub mod builder;
pub mod mention;
pub mod node;

// Re-export main types and functions
pub use builder::{ThreadError, build_forest};
pub use mention::{TextSegment, first_mention, scan_segments};
pub use node::{ThreadForest, ThreadNode};
