//! # Gloss Core Library
//!
//! This crate provides the file tree and content search engine behind the
//! Gloss markdown reader. It has no UI of its own: a front end observes the
//! [`TreeModel`] and [`SearchCoordinator`] and drives them from user input.
//!
//! ## Architecture
//!
//! - **Scanner** (`scanner`): Directory listing and recursive markdown walks
//! - **Tree** (`tree`): Lazily loaded file tree and selection
//! - **Search** (`search`): Debounced, cancellable, parallel content search
//! - **Document** (`document`): Document category classification
//! - **Types** (`types`): Plain data passed between components
//! - **Config** (`config`): Configuration management
//!
//! ## Example
//!
//! ```rust,no_run
//! use gloss_core::{SearchCoordinator, TreeModel};
//! use std::time::Duration;
//!
//! let mut tree = TreeModel::new();
//! tree.open_folder("/home/me/notes");
//!
//! let mut search = SearchCoordinator::new();
//! search.search("roadmap", tree.root_path());
//! search.wait(Duration::from_secs(5));
//! for m in search.results() {
//!     println!("{}:{}: {}", m.file_name, m.line_number, m.line_content);
//! }
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod scanner;
pub mod search;
pub mod tree;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use document::{classify, DocumentCategory};
pub use error::{GlossError, Result};
pub use search::{CancelToken, SearchCoordinator, SearchPhase, SearchSettings};
pub use tree::{TreeModel, TreeNode};
pub use types::{ContentMatch, EntryDescriptor};
