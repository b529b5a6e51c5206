//! Config command - show or initialize the configuration file.

use gloss_core::Config;
use std::path::PathBuf;

/// Run the config command.
pub fn run(config: Config, path: Option<PathBuf>, init: bool) -> anyhow::Result<()> {
    let path = match path {
        Some(path) => path,
        None => Config::default_config_path()?,
    };

    if init {
        if path.exists() {
            println!("Configuration already exists at {}", path.display());
            return Ok(());
        }
        config.save_to(&path)?;
        println!("Wrote default configuration to {}", path.display());
        return Ok(());
    }

    println!("# {}", path.display());
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}
