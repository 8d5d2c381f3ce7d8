//! Directory path management for locus
//!
//! All paths used by locus are centralized here.

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Get the base locus config directory (~/.config/locus/)
pub fn get_locus_dir() -> Result<PathBuf> {
    Ok(dirs::config_dir()
        .context("Failed to get config directory")?
        .join("locus"))
}

/// Get the config file path (~/.config/locus/config.toml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_locus_dir()?.join("config.toml"))
}

/// Get the log directory (~/.local/share/locus/logs/ or platform equivalent)
pub fn get_log_dir() -> Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .context("Failed to determine data directory (XDG_DATA_HOME or platform equivalent)")?;

    Ok(data_dir.join("locus").join("logs"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locus_dir_is_under_config() {
        let dir = get_locus_dir().unwrap();
        assert!(dir.ends_with("locus"));
        assert_eq!(dir.parent().unwrap(), dirs::config_dir().unwrap());
    }

    #[test]
    fn test_paths_are_correct() {
        let base = get_locus_dir().unwrap();
        assert_eq!(get_config_path().unwrap(), base.join("config.toml"));
        assert!(get_log_dir().unwrap().ends_with("locus/logs"));
    }
}
