//! Application state management.

use gloss_core::{Config, SearchCoordinator, TreeModel};
use std::path::{Path, PathBuf};
use tracing::info;

/// Shared application state.
pub struct App {
    /// Configuration
    pub config: Config,

    /// The open folder
    pub tree: TreeModel,

    /// Content search over the open folder
    pub search: SearchCoordinator,
}

impl App {
    /// Open `root` (or the configured default folder).
    pub fn open(config: Config, root: Option<PathBuf>) -> anyhow::Result<Self> {
        let root = config.resolve_root(root.as_deref())?;

        let mut tree = TreeModel::new();
        tree.open_folder(&root);
        let search = SearchCoordinator::with_settings(config.search_settings());

        info!(
            root = %root.display(),
            debounce_ms = config.search.debounce_ms,
            "Application initialized"
        );

        Ok(App {
            config,
            tree,
            search,
        })
    }

    /// Path of the open folder.
    pub fn root(&self) -> Option<&Path> {
        self.tree.root_path()
    }

    /// Issue a content search for `query` over the open folder.
    pub fn search_contents(&mut self, query: &str) {
        self.search.search(query, self.tree.root_path());
    }
}
