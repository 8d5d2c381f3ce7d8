//! Temporary artifact lifecycle
//!
//! Resources that have no direct file of their own (archive entries,
//! remote content) are copied into scratch files in the system temp
//! directory. Each scratch file is owned by a [`ScratchFile`] guard that
//! deletes it on drop, and is also recorded in a process-wide registry so
//! that [`purge`] can sweep up anything a guard never got to release (a
//! leaked guard, an early `process::exit`).
//!
//! Binaries should hold a [`PurgeOnExit`] guard for the lifetime of `main`.

use std::collections::BTreeSet;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};
use tempfile::TempPath;
use tracing::{debug, warn};

/// A set of scratch paths awaiting deletion
#[derive(Debug, Default)]
pub struct Registry {
    paths: Mutex<BTreeSet<PathBuf>>,
}

impl Registry {
    fn paths(&self) -> MutexGuard<'_, BTreeSet<PathBuf>> {
        self.paths.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn register(&self, path: &Path) {
        self.paths().insert(path.to_path_buf());
    }

    /// Remove a path without touching the file
    pub fn forget(&self, path: &Path) -> bool {
        self.paths().remove(path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.paths().contains(path)
    }

    pub fn snapshot(&self) -> Vec<PathBuf> {
        self.paths().iter().cloned().collect()
    }

    /// Delete every registered file that still exists
    ///
    /// Returns the number of files removed. Files that cannot be removed are
    /// logged and dropped from the registry all the same.
    pub fn purge(&self) -> usize {
        let paths = std::mem::take(&mut *self.paths());
        let mut removed = 0;

        for path in paths {
            match std::fs::remove_file(&path) {
                Ok(()) => removed += 1,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => warn!("Failed to remove scratch file {}: {}", path.display(), e),
            }
        }

        if removed > 0 {
            debug!("Purged {} scratch file(s)", removed);
        }
        removed
    }
}

static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::default);

/// Whether a path is awaiting cleanup in the process registry
pub fn is_registered(path: &Path) -> bool {
    REGISTRY.contains(path)
}

/// Snapshot of the process registry
pub fn registered() -> Vec<PathBuf> {
    REGISTRY.snapshot()
}

/// Delete every file left in the process registry
pub fn purge() -> usize {
    REGISTRY.purge()
}

/// Create a registered scratch file named `<prefix>…<suffix>`
///
/// The returned [`File`] is open for writing; the [`ScratchFile`] owns the
/// path.
pub fn create(prefix: &str, suffix: &str) -> io::Result<(File, ScratchFile)> {
    let (file, path) = tempfile::Builder::new()
        .prefix(prefix)
        .suffix(suffix)
        .tempfile()?
        .into_parts();

    REGISTRY.register(&path);
    debug!("Created scratch file {}", path.display());

    Ok((file, ScratchFile { path: Some(path) }))
}

/// Owning handle to a scratch file
///
/// Dropping it deletes the file and removes it from the registry.
#[derive(Debug)]
pub struct ScratchFile {
    path: Option<TempPath>,
}

impl ScratchFile {
    pub fn path(&self) -> &Path {
        self.path.as_deref().unwrap_or(Path::new(""))
    }

    /// Persist the file past the guard's lifetime
    pub fn keep(mut self) -> io::Result<PathBuf> {
        let path = self
            .path
            .take()
            .ok_or_else(|| io::Error::other("scratch file already released"))?;
        REGISTRY.forget(&path);
        path.keep().map_err(io::Error::from)
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        if let Some(path) = self.path.take() {
            REGISTRY.forget(&path);
            if let Err(e) = path.close() {
                warn!("Failed to remove scratch file: {}", e);
            }
        }
    }
}

/// Purges the process registry when dropped
#[derive(Debug, Default)]
#[must_use = "the registry is purged when this guard is dropped"]
pub struct PurgeOnExit;

impl Drop for PurgeOnExit {
    fn drop(&mut self) {
        purge();
    }
}
