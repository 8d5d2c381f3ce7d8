//! Configuration file I/O operations
//!
//! This module handles reading, writing, and updating the locus configuration
//! file. All operations include automatic validation.

use super::paths::get_config_path;
use super::schema::LocusConfig;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Load configuration from the default location
///
/// Returns a default config if the file doesn't exist.
pub fn load_config() -> Result<LocusConfig> {
    load_config_from(&get_config_path()?)
}

/// Load and validate configuration from an explicit path
///
/// Returns a default config if the file doesn't exist.
pub fn load_config_from(path: &Path) -> Result<LocusConfig> {
    if !path.exists() {
        return Ok(LocusConfig::default());
    }

    let content =
        fs::read_to_string(path).context(format!("Failed to read config: {}", path.display()))?;

    let config: LocusConfig =
        toml::from_str(&content).context(format!("Failed to parse config: {}", path.display()))?;

    if let Err(errors) = config.validate() {
        anyhow::bail!(
            "Config validation failed in {}:\n  {}",
            path.display(),
            errors.join("\n  ")
        );
    }

    Ok(config)
}

/// Validate and write configuration to an explicit path
///
/// Creates parent directories if needed.
pub fn save_config_to(config: &LocusConfig, path: &Path) -> Result<()> {
    if let Err(errors) = config.validate() {
        anyhow::bail!("cannot save invalid config:\n  {}", errors.join("\n  "));
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context(format!(
            "Failed to create config directory: {}",
            parent.display()
        ))?;
    }

    let content = toml::to_string_pretty(config).context("Failed to serialize config")?;

    fs::write(path, content).context(format!("Failed to write config: {}", path.display()))?;

    Ok(())
}

/// Load → modify → validate → save
pub fn update_config_at<F>(path: &Path, f: F) -> Result<()>
where
    F: FnOnce(&mut LocusConfig) -> Result<()>,
{
    let mut config = load_config_from(path)?;
    f(&mut config)?;
    save_config_to(&config, path)
}

fn canonical(path: &Path, kind: &str) -> Result<PathBuf> {
    path.canonicalize().map_err(|e| {
        anyhow::anyhow!(
            "{} does not exist or cannot be resolved: '{}'\nerror: {}",
            kind,
            path.display(),
            e
        )
    })
}

/// Append a resource directory, stored as an absolute path
///
/// Adding a directory that is already listed is a no-op.
pub fn register_resource_dir(config_path: &Path, dir: &Path) -> Result<PathBuf> {
    let dir = canonical(dir, "resource directory")?;
    if !dir.is_dir() {
        anyhow::bail!("not a directory: '{}'", dir.display());
    }

    update_config_at(config_path, |config| {
        if !config.resource_dirs.contains(&dir) {
            config.resource_dirs.push(dir.clone());
        }
        Ok(())
    })?;
    Ok(dir)
}

/// Append an archive, stored as an absolute path
///
/// Adding an archive that is already listed is a no-op.
pub fn register_archive(config_path: &Path, archive: &Path) -> Result<PathBuf> {
    let archive = canonical(archive, "archive")?;
    if !archive.is_file() {
        anyhow::bail!("not a file: '{}'", archive.display());
    }

    update_config_at(config_path, |config| {
        if !config.archives.contains(&archive) {
            config.archives.push(archive.clone());
        }
        Ok(())
    })?;
    Ok(archive)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_nonexistent_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let config = load_config_from(&temp_dir.path().join("missing.toml")).unwrap();
        assert_eq!(config, LocusConfig::default());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let mut config = LocusConfig::default();
        config.remote.enabled = false;
        config.scratch.prefix = "res-".to_string();

        save_config_to(&config, &config_path).unwrap();
        let loaded = load_config_from(&config_path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_rejects_invalid_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "[remote]\ntimeout_secs = 0\n").unwrap();

        let err = load_config_from(&config_path).unwrap_err();
        assert!(err.to_string().contains("Config validation failed"));
    }

    #[test]
    fn test_save_rejects_invalid_config() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = LocusConfig::default();
        config.scratch.suffix = "a/b".to_string();

        assert!(save_config_to(&config, &temp_dir.path().join("config.toml")).is_err());
    }

    #[test]
    fn test_register_resource_dir_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let assets = temp_dir.path().join("assets");
        fs::create_dir(&assets).unwrap();

        let first = register_resource_dir(&config_path, &assets).unwrap();
        let second = register_resource_dir(&config_path, &assets).unwrap();

        assert_eq!(first, second);
        let config = load_config_from(&config_path).unwrap();
        assert_eq!(config.resource_dirs, vec![first]);
    }

    #[test]
    fn test_register_archive_requires_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        let err = register_archive(&config_path, &temp_dir.path().join("nope.zip")).unwrap_err();
        assert!(err.to_string().contains("does not exist"));

        let err = register_archive(&config_path, temp_dir.path()).unwrap_err();
        assert!(err.to_string().contains("not a file"));
    }
}
