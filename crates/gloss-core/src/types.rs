//! Core data types for Gloss.
//!
//! These are plain values passed between the scanner, the tree and the
//! search coordinator. None of them hold filesystem handles.

use crate::document::DocumentCategory;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One kept entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDescriptor {
    /// Full path of the entry
    pub path: PathBuf,

    /// Filename without path (e.g., "README.md")
    pub name: String,

    /// True if this is a directory, false for markdown files
    pub is_dir: bool,
}

impl EntryDescriptor {
    /// Create a new entry descriptor
    pub fn new(path: PathBuf, name: impl Into<String>, is_dir: bool) -> Self {
        EntryDescriptor {
            path,
            name: name.into(),
            is_dir,
        }
    }
}

/// A single line matched by a content search.
///
/// ## Design Notes
///
/// - `line_content` holds at most the first `max_line_chars` characters of
///   the line, trimmed of surrounding whitespace
/// - `category` is computed from `file_name` and the parent folder name so
///   the UI does not need to reclassify results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentMatch {
    /// Full path of the matching file
    pub path: PathBuf,

    /// Filename without path
    pub file_name: String,

    /// 1-based line number of the match
    pub line_number: usize,

    /// The matching line, truncated and trimmed
    pub line_content: String,

    /// Category of the containing document
    pub category: DocumentCategory,
}
