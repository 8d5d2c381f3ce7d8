//! Configuration schema for locus
//!
//! Every field has a default so a partial (or missing) config file is valid.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for locus
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct LocusConfig {
    /// Directories searched as the loose-file bundled namespace, in order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub resource_dirs: Vec<PathBuf>,

    /// Zip archives searched as packaged namespaces, in order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub archives: Vec<PathBuf>,

    pub scratch: ScratchSettings,

    pub resolver: ChainSettings,

    pub remote: RemoteSettings,
}

/// Naming of scratch files created for archive and remote content
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScratchSettings {
    pub prefix: String,
    pub suffix: String,
}

impl Default for ScratchSettings {
    fn default() -> Self {
        Self {
            prefix: "locus-".to_string(),
            suffix: ".tmp".to_string(),
        }
    }
}

/// Behaviour of the strategy chain itself
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChainSettings {
    /// Return the literal name as a path when every strategy falls through
    ///
    /// When disabled an exhausted chain is a `NotFound` error.
    pub literal_fallback: bool,
}

impl Default for ChainSettings {
    fn default() -> Self {
        Self {
            literal_fallback: true,
        }
    }
}

/// Remote fetch settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RemoteSettings {
    /// Try names as URLs at all
    pub enabled: bool,

    pub user_agent: String,

    /// Whole-request timeout; none by default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Honour `HTTP_PROXY`/`HTTPS_PROXY` from the environment
    pub system_proxy: bool,
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            user_agent: concat!("locus/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: None,
            system_proxy: true,
        }
    }
}

impl LocusConfig {
    /// Validate the configuration for common errors
    ///
    /// Returns Ok(()) if valid, or Err with a list of error messages
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        for (field, value) in [
            ("scratch.prefix", &self.scratch.prefix),
            ("scratch.suffix", &self.scratch.suffix),
        ] {
            if value.contains(['/', '\\']) {
                errors.push(format!(
                    "{} '{}' must not contain path separators",
                    field, value
                ));
            }
        }

        if self.remote.user_agent.trim().is_empty() {
            errors.push("remote.user_agent cannot be empty".to_string());
        }

        if self.remote.timeout_secs == Some(0) {
            errors.push("remote.timeout_secs must be greater than zero".to_string());
        }

        for (i, dir) in self.resource_dirs.iter().enumerate() {
            if dir.as_os_str().is_empty() {
                errors.push(format!("resource_dirs[{}] cannot be empty", i));
            }
        }

        for (i, archive) in self.archives.iter().enumerate() {
            if archive.as_os_str().is_empty() {
                errors.push(format!("archives[{}] cannot be empty", i));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
