//! `config` subcommands

use crate::config::{self, LocusConfig};
use anyhow::Result;
use std::path::Path;

/// Write a default config file
pub fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "config '{}' already exists, use --force to overwrite",
            path.display()
        );
    }

    config::save_config_to(&LocusConfig::default(), path)?;
    println!("Wrote {}", path.display());
    Ok(())
}

/// Print the effective config as TOML
pub fn show(path: &Path) -> Result<()> {
    let config = config::load_config_from(path)?;
    println!("# {}", path.display());
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}

/// Add a directory to `resource_dirs`
pub fn add_dir(path: &Path, dir: &Path) -> Result<()> {
    let dir = config::register_resource_dir(path, dir)?;
    println!("Added resource directory {}", dir.display());
    Ok(())
}

/// Add a zip archive to `archives`
pub fn add_archive(path: &Path, archive: &Path) -> Result<()> {
    let archive = config::register_archive(path, archive)?;
    println!("Added archive {}", archive.display());
    Ok(())
}
