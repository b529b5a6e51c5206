//! Find command - match documents by filename.

use crate::app::App;
use crate::OutputFormat;
use gloss_core::Config;
use std::path::PathBuf;
use std::time::Instant;

/// Run the find command.
pub fn run(
    config: Config,
    name: &str,
    root: Option<PathBuf>,
    output: OutputFormat,
) -> anyhow::Result<()> {
    let mut app = App::open(config, root)?;

    let start = Instant::now();
    let matches = app.tree.name_filter_results(name).unwrap_or_default();
    let elapsed = start.elapsed();

    match output {
        OutputFormat::Text => {
            for node in &matches {
                println!("{} {}", node.category.icon(), node.path.display());
            }

            eprintln!();
            eprintln!(
                "Found {} documents in {:.3}ms",
                matches.len(),
                elapsed.as_secs_f64() * 1000.0
            );
        }
        OutputFormat::Json => {
            let json_results: Vec<serde_json::Value> = matches
                .iter()
                .map(|node| {
                    serde_json::json!({
                        "name": node.name,
                        "path": node.path,
                        "category": node.category,
                    })
                })
                .collect();

            println!("{}", serde_json::to_string_pretty(&json_results)?);
        }
    }

    Ok(())
}
