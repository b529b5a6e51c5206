//! Document classification.
//!
//! Markdown documents are grouped into a small set of categories based on
//! the folder they live in or on keywords in their filename. The rules are
//! ordered tables: folder names are checked first, then filename keywords,
//! and the first match wins.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Semantic category of a document or tree entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentCategory {
    Pitch,
    Retrospective,
    Strategy,
    Principle,
    Audit,
    Flashcard,
    Template,
    Decision,
    Research,
    Readme,
    Changelog,
    Plan,
    Folder,
    Generic,
}

/// Parent folder names that imply a category, compared after lowercasing.
const FOLDER_RULES: &[(&str, DocumentCategory)] = &[
    ("pitches", DocumentCategory::Pitch),
    ("retrospectives", DocumentCategory::Retrospective),
    ("strategies", DocumentCategory::Strategy),
    ("principles", DocumentCategory::Principle),
    ("audits", DocumentCategory::Audit),
    ("flashcards", DocumentCategory::Flashcard),
    ("templates", DocumentCategory::Template),
    ("decisions", DocumentCategory::Decision),
    ("research", DocumentCategory::Research),
];

/// Filename keywords in precedence order.
const KEYWORD_RULES: &[(&str, DocumentCategory)] = &[
    ("pitch", DocumentCategory::Pitch),
    ("retro", DocumentCategory::Retrospective),
    ("strategy", DocumentCategory::Strategy),
    ("principle", DocumentCategory::Principle),
    ("audit", DocumentCategory::Audit),
    ("flashcard", DocumentCategory::Flashcard),
    ("template", DocumentCategory::Template),
    ("decision", DocumentCategory::Decision),
    ("adr", DocumentCategory::Decision),
    ("brief", DocumentCategory::Research),
    ("readme", DocumentCategory::Readme),
    ("changelog", DocumentCategory::Changelog),
    ("plan", DocumentCategory::Plan),
];

/// Classify a document from its filename and the name of its parent folder.
///
/// Both inputs are compared case-insensitively. This never fails: anything
/// that matches no rule is [`DocumentCategory::Generic`].
///
/// # Example
/// ```
/// use gloss_core::{classify, DocumentCategory};
/// assert_eq!(classify("pitch-notes.md", "templates"), DocumentCategory::Template);
/// assert_eq!(classify("ADR-001.md", ""), DocumentCategory::Decision);
/// ```
pub fn classify(filename: &str, parent_folder_name: &str) -> DocumentCategory {
    let name_lower = filename.to_lowercase();
    let folder_lower = parent_folder_name.to_lowercase();

    if let Some((_, category)) = FOLDER_RULES
        .iter()
        .find(|(folder, _)| *folder == folder_lower)
    {
        return *category;
    }

    KEYWORD_RULES
        .iter()
        .find(|(keyword, _)| name_lower.contains(keyword))
        .map(|(_, category)| *category)
        .unwrap_or(DocumentCategory::Generic)
}

impl DocumentCategory {
    /// Every category, in declaration order.
    pub const ALL: [DocumentCategory; 14] = [
        DocumentCategory::Pitch,
        DocumentCategory::Retrospective,
        DocumentCategory::Strategy,
        DocumentCategory::Principle,
        DocumentCategory::Audit,
        DocumentCategory::Flashcard,
        DocumentCategory::Template,
        DocumentCategory::Decision,
        DocumentCategory::Research,
        DocumentCategory::Readme,
        DocumentCategory::Changelog,
        DocumentCategory::Plan,
        DocumentCategory::Folder,
        DocumentCategory::Generic,
    ];

    /// Stable lowercase identifier, suitable for persisting next to a path.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentCategory::Pitch => "pitch",
            DocumentCategory::Retrospective => "retrospective",
            DocumentCategory::Strategy => "strategy",
            DocumentCategory::Principle => "principle",
            DocumentCategory::Audit => "audit",
            DocumentCategory::Flashcard => "flashcard",
            DocumentCategory::Template => "template",
            DocumentCategory::Decision => "decision",
            DocumentCategory::Research => "research",
            DocumentCategory::Readme => "readme",
            DocumentCategory::Changelog => "changelog",
            DocumentCategory::Plan => "plan",
            DocumentCategory::Folder => "folder",
            DocumentCategory::Generic => "generic",
        }
    }

    /// Human-readable label
    pub fn display_name(&self) -> &'static str {
        match self {
            DocumentCategory::Pitch => "Pitch",
            DocumentCategory::Retrospective => "Retrospective",
            DocumentCategory::Strategy => "Strategy",
            DocumentCategory::Principle => "Principle",
            DocumentCategory::Audit => "Audit",
            DocumentCategory::Flashcard => "Flashcard",
            DocumentCategory::Template => "Template",
            DocumentCategory::Decision => "Decision",
            DocumentCategory::Research => "Research",
            DocumentCategory::Readme => "README",
            DocumentCategory::Changelog => "Changelog",
            DocumentCategory::Plan => "Plan",
            DocumentCategory::Folder => "Folder",
            DocumentCategory::Generic => "Document",
        }
    }

    /// Icon shown next to tree entries and search results
    pub fn icon(&self) -> &'static str {
        match self {
            DocumentCategory::Pitch => "💡",
            DocumentCategory::Retrospective => "📊",
            DocumentCategory::Strategy => "🎯",
            DocumentCategory::Principle => "⚖️",
            DocumentCategory::Audit => "🔍",
            DocumentCategory::Flashcard => "🃏",
            DocumentCategory::Template => "📋",
            DocumentCategory::Decision => "⚡",
            DocumentCategory::Research => "🔬",
            DocumentCategory::Readme => "📖",
            DocumentCategory::Changelog => "📝",
            DocumentCategory::Plan => "🗺️",
            DocumentCategory::Folder => "📂",
            DocumentCategory::Generic => "📄",
        }
    }
}

impl fmt::Display for DocumentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentCategory::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown document category: {}", s))
    }
}
