//! Lazily loaded file tree for a markdown folder.
//!
//! The tree is an owned hierarchy: each [`TreeNode`] owns its children and
//! there are no parent pointers. Directory contents are read one level at a
//! time, only when a node is expanded, refreshed or searched by name.
//!
//! The selected document is stored as a path and looked up on demand, so
//! replacing a subtree can never leave a dangling selection behind (it may
//! merely point at something that is no longer loaded).

use crate::document::{classify, DocumentCategory};
use crate::scanner::{list_children, sort_entries};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A node in the file tree: one directory or markdown file.
#[derive(Debug, Clone)]
pub struct TreeNode {
    /// Full path of the entry
    pub path: PathBuf,

    /// Last path component, shown in the tree
    pub name: String,

    /// True for directories
    pub is_dir: bool,

    /// Category used for icons; always `Folder` for directories
    pub category: DocumentCategory,

    /// `None` = not loaded yet, `Some(vec![])` = loaded and empty.
    /// Always `None` for files.
    children: Option<Vec<TreeNode>>,

    /// Whether the node is shown expanded
    pub is_expanded: bool,
}

impl TreeNode {
    /// Create a node for `path`.
    ///
    /// Files are classified using `parent_folder_name` as folder context.
    pub fn new(path: impl Into<PathBuf>, is_dir: bool, parent_folder_name: &str) -> Self {
        let path = path.into();
        let name = display_name(&path);
        let category = if is_dir {
            DocumentCategory::Folder
        } else {
            classify(&name, parent_folder_name)
        };

        TreeNode {
            path,
            name,
            is_dir,
            category,
            children: None,
            is_expanded: false,
        }
    }

    /// Create an unloaded, collapsed directory node
    pub fn directory(path: impl Into<PathBuf>) -> Self {
        Self::new(path, true, "")
    }

    /// Loaded children, or `None` if this level has not been read yet.
    pub fn children(&self) -> Option<&[TreeNode]> {
        self.children.as_deref()
    }

    /// Mutable access to loaded children
    pub fn children_mut(&mut self) -> Option<&mut [TreeNode]> {
        self.children.as_deref_mut()
    }

    /// Whether this directory's contents have been read
    pub fn is_loaded(&self) -> bool {
        self.children.is_some()
    }

    /// Find a loaded child by name
    pub fn child(&self, name: &str) -> Option<&TreeNode> {
        self.children()?.iter().find(|c| c.name == name)
    }

    /// Read this directory's entries and replace `children` with them.
    ///
    /// Does nothing for files. Calling it again re-reads the directory:
    /// child nodes are rebuilt, so anything previously loaded below them
    /// is dropped and reloads on the next expansion.
    pub fn load_children(&mut self) {
        if !self.is_dir {
            return;
        }

        let mut entries = list_children(&self.path);
        sort_entries(&mut entries);

        let nodes: Vec<TreeNode> = entries
            .into_iter()
            .map(|entry| TreeNode::new(entry.path, entry.is_dir, &self.name))
            .collect();

        debug!(path = %self.path.display(), children = nodes.len(), "Loaded directory");
        self.children = Some(nodes);
    }

    /// Collapse if expanded; otherwise load (first time only) and expand.
    pub fn toggle(&mut self) {
        if self.is_expanded {
            self.is_expanded = false;
        } else {
            if self.children.is_none() {
                self.load_children();
            }
            self.is_expanded = true;
        }
    }

    /// Flatten the visible part of the tree, depth-first.
    ///
    /// Yields `(depth, node)` for this node's loaded children and, for
    /// expanded directories, their visible descendants. This node itself
    /// is not included.
    pub fn visible_rows(&self) -> Vec<(usize, &TreeNode)> {
        let mut rows = Vec::new();
        self.collect_visible(0, &mut rows);
        rows
    }

    fn collect_visible<'a>(&'a self, depth: usize, rows: &mut Vec<(usize, &'a TreeNode)>) {
        for child in self.children().unwrap_or_default() {
            rows.push((depth, child));
            if child.is_expanded {
                child.collect_visible(depth + 1, rows);
            }
        }
    }

    /// Find a loaded descendant (or this node) by path
    pub fn find(&self, path: &Path) -> Option<&TreeNode> {
        if self.path == path {
            return Some(self);
        }
        if !path.starts_with(&self.path) {
            return None;
        }
        self.children()?.iter().find_map(|c| c.find(path))
    }

    /// Mutable variant of [`TreeNode::find`]
    pub fn find_mut(&mut self, path: &Path) -> Option<&mut TreeNode> {
        if self.path == path {
            return Some(self);
        }
        if !path.starts_with(&self.path) {
            return None;
        }
        self.children
            .as_mut()?
            .iter_mut()
            .find_map(|c| c.find_mut(path))
    }

    /// Load every directory below this node that is not loaded yet and
    /// collect the files whose name contains `needle` (already lowercased).
    fn collect_name_matches<'a>(&'a mut self, needle: &str, out: &mut Vec<&'a TreeNode>) {
        if self.is_dir && self.children.is_none() {
            self.load_children();
        }

        if let Some(children) = self.children.as_mut() {
            for child in children.iter_mut() {
                if child.is_dir {
                    child.collect_name_matches(needle, out);
                } else if child.name.to_lowercase().contains(needle) {
                    out.push(child);
                }
            }
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// File tree state for one session: the open folder and the selection.
#[derive(Debug, Default)]
pub struct TreeModel {
    /// Root node of the open folder, if any
    pub root: Option<TreeNode>,

    /// Path of the selected document
    pub selected: Option<PathBuf>,

    /// Name filter text, distinct from the content search query
    pub search_query: String,
}

impl TreeModel {
    /// Create an empty model with no folder open
    pub fn new() -> Self {
        Self::default()
    }

    /// Open `path` as the new root, replacing any previous tree.
    ///
    /// The first level is loaded immediately and the root is expanded.
    pub fn open_folder(&mut self, path: impl Into<PathBuf>) {
        let mut node = TreeNode::directory(path);
        node.load_children();
        node.is_expanded = true;

        info!(
            path = %node.path.display(),
            entries = node.children().map_or(0, <[TreeNode]>::len),
            "Opened folder"
        );
        self.root = Some(node);
    }

    /// Drop the current tree. The selection is left as is.
    pub fn close_folder(&mut self) {
        if let Some(root) = self.root.take() {
            info!(path = %root.path.display(), "Closed folder");
        }
    }

    /// Whether a folder is currently open
    pub fn has_folder(&self) -> bool {
        self.root.is_some()
    }

    /// Display name of the open folder, or an empty string
    pub fn folder_name(&self) -> &str {
        self.root.as_ref().map_or("", |r| r.name.as_str())
    }

    /// Path of the open folder
    pub fn root_path(&self) -> Option<&Path> {
        self.root.as_ref().map(|r| r.path.as_path())
    }

    /// Select a document by path
    pub fn select(&mut self, path: impl Into<PathBuf>) {
        self.selected = Some(path.into());
    }

    /// Clear the selection
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// The selected node, if it is still part of the loaded tree
    pub fn selected_node(&self) -> Option<&TreeNode> {
        let selected = self.selected.as_deref()?;
        self.find_node(selected)
    }

    /// Look up a loaded node by path
    pub fn find_node(&self, path: &Path) -> Option<&TreeNode> {
        self.root.as_ref()?.find(path)
    }

    /// Mutable lookup of a loaded node by path, e.g. to toggle it
    pub fn find_node_mut(&mut self, path: &Path) -> Option<&mut TreeNode> {
        self.root.as_mut()?.find_mut(path)
    }

    /// Files whose name contains `query`, case-insensitively.
    ///
    /// Returns `None` when there is no active filter (empty query or no
    /// folder open), which is different from an empty match list. Any
    /// directory not loaded yet is loaded along the way, so this reads the
    /// whole folder on first use.
    pub fn name_filter_results(&mut self, query: &str) -> Option<Vec<&TreeNode>> {
        if query.is_empty() {
            return None;
        }
        let root = self.root.as_mut()?;

        let needle = query.to_lowercase();
        let mut matches = Vec::new();
        root.collect_name_matches(&needle, &mut matches);
        Some(matches)
    }

    /// [`TreeModel::name_filter_results`] for the stored `search_query`.
    pub fn search_results(&mut self) -> Option<Vec<&TreeNode>> {
        let query = self.search_query.clone();
        self.name_filter_results(&query)
    }
}
