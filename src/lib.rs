//! Comment-thread reconstruction for Hatena Bookmark entries.
//!
//! Given the flat bookmark list the `jsonlite` entry API returns for one page,
//! this crate rebuilds the two-level reply hierarchy implied by inline
//! `id:<name>` mentions and computes compact relative-age labels for display.
//!
//! ## Module Structure
//!
//! - `models`: wire types for the jsonlite entry payload
//! - `threading`: the reply-forest builder and mention scanner
//! - `timefmt`: relative-age label formatting
//! - `fetch`: HTTP client for the entry endpoint
//! - `links`: URL helpers for user-facing bookmark links

pub mod fetch;
pub mod links;
pub mod models;
pub mod threading;
pub mod timefmt;
