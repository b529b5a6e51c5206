//! Tree command - print the document tree of a folder.

use crate::app::App;
use gloss_core::{Config, TreeNode};
use std::path::PathBuf;

/// Run the tree command.
pub fn run(config: Config, root: Option<PathBuf>, depth: Option<usize>) -> anyhow::Result<()> {
    let depth = depth.unwrap_or(config.tree.expand_depth).max(1);
    let mut app = App::open(config, root)?;

    let Some(root) = app.tree.root.as_mut() else {
        return Ok(());
    };

    // The root level is already open; expand the levels below it
    expand(root, depth - 1);

    println!("{} {}", root.category.icon(), root.path.display());
    for (level, node) in root.visible_rows() {
        let marker = if node.is_dir && !node.is_expanded { "▸ " } else { "" };
        println!(
            "{}{}{} {}",
            "  ".repeat(level + 1),
            marker,
            node.category.icon(),
            node.name
        );
    }

    Ok(())
}

/// Expand directories below `node` for `levels` more levels.
fn expand(node: &mut TreeNode, levels: usize) {
    if levels == 0 {
        return;
    }
    if let Some(children) = node.children_mut() {
        for child in children.iter_mut().filter(|c| c.is_dir) {
            child.toggle();
            expand(child, levels - 1);
        }
    }
}
