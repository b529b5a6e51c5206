//! Filesystem scanning for markdown folders.
//!
//! Two entry points share one set of rules:
//! - [`list_children`] lists a single directory level for the tree
//! - [`walk_markdown_files`] lazily walks a whole folder for content search
//!
//! Hidden entries (leading `.`) and a fixed set of tool/OS directories are
//! dropped entirely; excluded directories are never descended into. Only
//! files with a markdown extension are kept. Read failures degrade to "no
//! entries" and are logged at debug level.

use crate::types::EntryDescriptor;
use std::cmp::Ordering;
use std::fs;
use std::iter::Peekable;
use std::path::{Path, PathBuf};
use std::str::Chars;
use tracing::debug;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;
use walkdir::WalkDir;

/// File extensions treated as markdown, compared case-insensitively.
pub const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];

/// Entry names that are never listed or walked.
pub const EXCLUDED_NAMES: &[&str] = &[
    "node_modules",
    ".git",
    ".build",
    ".swiftpm",
    "__pycache__",
    ".DS_Store",
    "Thumbs.db",
];

/// Check if an entry name is hidden or in the exclusion set.
pub fn is_excluded_name(name: &str) -> bool {
    name.starts_with('.') || EXCLUDED_NAMES.contains(&name)
}

/// Check if a path has a markdown extension.
pub fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| {
            MARKDOWN_EXTENSIONS
                .iter()
                .any(|md| ext.eq_ignore_ascii_case(md))
        })
}

/// List the immediate entries of `dir` that belong in the tree.
///
/// Directories are kept unconditionally, files only when they are markdown.
/// The result is unsorted; see [`sort_entries`]. An unreadable directory
/// yields an empty list.
pub fn list_children(dir: &Path) -> Vec<EntryDescriptor> {
    let read_dir = match fs::read_dir(dir) {
        Ok(read_dir) => read_dir,
        Err(e) => {
            debug!(path = %dir.display(), error = %e, "Cannot list directory");
            return Vec::new();
        }
    };

    let mut entries = Vec::new();
    for entry in read_dir {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!(path = %dir.display(), error = %e, "Skipping unreadable entry");
                continue;
            }
        };

        let name = entry.file_name().to_string_lossy().into_owned();
        if is_excluded_name(&name) {
            continue;
        }

        // file_type() does not follow symlinks, so linked directories are
        // never treated as directories and cannot form cycles.
        let is_dir = match entry.file_type() {
            Ok(file_type) => file_type.is_dir(),
            Err(e) => {
                debug!(name = %name, error = %e, "Skipping entry without file type");
                continue;
            }
        };

        let path = entry.path();
        if is_dir || is_markdown_file(&path) {
            entries.push(EntryDescriptor::new(path, name, is_dir));
        }
    }

    entries
}

/// Sort sibling entries: directories first, then by name.
pub fn sort_entries(entries: &mut [EntryDescriptor]) {
    entries.sort_by(|a, b| {
        b.is_dir
            .cmp(&a.is_dir)
            .then_with(|| compare_names(&a.name, &b.name))
    });
}

/// Compare two entry names the way a file browser does.
///
/// Case- and accent-insensitive, with runs of digits compared by numeric
/// value so that `note2.md` sorts before `note10.md` and `Éclair.md` sits
/// between `apple.md` and `zebra.md`. Names that are equal after folding
/// are ordered by their accents, then by their raw bytes, so the order is
/// total.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    natural_cmp(&fold_name(a), &fold_name(b))
        .then_with(|| natural_cmp(&a.to_lowercase(), &b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

/// Primary sort key: decomposed, stripped of combining marks, lowercased.
fn fold_name(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let x_run = take_digits(&mut left);
                let y_run = take_digits(&mut right);
                let ord = compare_digit_runs(&x_run, &y_run);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(x), Some(y)) => {
                left.next();
                right.next();
                if x != y {
                    return x.cmp(&y);
                }
            }
        }
    }
}

fn take_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.peek().copied().filter(char::is_ascii_digit) {
        run.push(c);
        chars.next();
    }
    run
}

fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a_trimmed = a.trim_start_matches('0');
    let b_trimmed = b.trim_start_matches('0');
    a_trimmed
        .len()
        .cmp(&b_trimmed.len())
        .then_with(|| a_trimmed.cmp(b_trimmed))
}

/// Lazily walk `root` and yield every markdown file beneath it.
///
/// Excluded and hidden directories are pruned without being read. The walk
/// does filesystem work only as the iterator is advanced, so a caller that
/// stops consuming it (or drops it) stops the walk.
pub fn walk_markdown_files(root: &Path) -> impl Iterator<Item = PathBuf> {
    walk_markdown_files_while(root, || true)
}

/// [`walk_markdown_files`] that ends as soon as `keep_going` returns false.
///
/// `keep_going` is consulted before every entry the walk visits, markdown
/// or not, so a stop request takes effect even inside large directories
/// with no markdown files.
pub fn walk_markdown_files_while<F>(
    root: &Path,
    mut keep_going: F,
) -> impl Iterator<Item = PathBuf>
where
    F: FnMut() -> bool,
{
    WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0 || !is_excluded_name(&entry.file_name().to_string_lossy())
        })
        .take_while(move |_| keep_going())
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!(error = %e, "Skipping unreadable entry during walk");
                None
            }
        })
        .filter(|entry| !entry.file_type().is_dir() && is_markdown_file(entry.path()))
        .map(walkdir::DirEntry::into_path)
}
