//! Search command - find lines in document contents.

use crate::app::App;
use crate::OutputFormat;
use gloss_core::Config;
use std::path::PathBuf;
use std::time::Duration;

/// Run the search command.
pub fn run(
    mut config: Config,
    query: &str,
    root: Option<PathBuf>,
    limit: Option<usize>,
    timeout_secs: u64,
    output: OutputFormat,
) -> anyhow::Result<()> {
    if let Some(limit) = limit {
        config.search.max_results = limit;
    }
    // A one-shot search has no keystrokes to wait out
    config.search.debounce_ms = 0;

    let mut app = App::open(config, root)?;

    app.search_contents(query);
    if !app.search.wait(Duration::from_secs(timeout_secs)) {
        anyhow::bail!("search did not finish within {}s", timeout_secs);
    }

    let results = app.search.results();

    match output {
        OutputFormat::Text => {
            for m in results {
                println!(
                    "{} {}:{}: {}",
                    m.category.icon(),
                    m.path.display(),
                    m.line_number,
                    m.line_content
                );
            }

            let elapsed = app.search.last_duration().unwrap_or_default();
            eprintln!();
            eprintln!(
                "Found {} matches in {} documents in {:.3}ms",
                results.len(),
                app.search.last_file_count(),
                elapsed.as_secs_f64() * 1000.0
            );
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(results)?);
        }
    }

    Ok(())
}
