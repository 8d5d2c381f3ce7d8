//! Lookup contexts: the bundled-resource namespaces searched by the resolver
//!
//! A context answers two questions about a resource name: where is it
//! ([`LookupContext::locate`]) and what are its bytes
//! ([`LookupContext::open`]). Contexts backed by loose files on disk can
//! hand out a real path; packaged contexts (zip archives, trees compiled into
//! the binary) only have a locator string, which the resolver refuses to
//! return directly and instead materializes through `open`.

use include_dir::{Dir, include_dir};
use std::fmt;
use std::fs::File;
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resources compiled into this crate from `resources/`
pub static BUNDLED: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/resources");

/// Where a bundled resource lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Located {
    /// A loose file reachable through a normal path
    File(PathBuf),
    /// An entry inside a packaged archive; the string is a locator, not a path
    Packaged(String),
}

/// A bundled-resource namespace
pub trait LookupContext: fmt::Debug + Send + Sync {
    /// Find a resource without reading it
    fn locate(&self, name: &str) -> Option<Located>;

    /// Open a resource as a byte stream, whatever its origin
    fn open(&self, name: &str) -> io::Result<Box<dyn Read + '_>>;
}

/// Namespace names are always relative to the namespace root
fn normalize(name: &str) -> &str {
    name.trim_start_matches('/')
}

fn not_found(name: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("resource not in namespace: '{}'", name),
    )
}

/// Loose files under one or more root directories, searched in order
#[derive(Debug, Clone, Default)]
pub struct DirectoryContext {
    roots: Vec<PathBuf>,
}

impl DirectoryContext {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            roots: vec![root.into()],
        }
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.roots.push(root.into());
        self
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    fn find(&self, name: &str) -> Option<PathBuf> {
        let name = normalize(name);
        if name.is_empty() {
            return None;
        }
        self.roots
            .iter()
            .map(|root| root.join(name))
            .find(|candidate| candidate.is_file())
    }
}

impl LookupContext for DirectoryContext {
    fn locate(&self, name: &str) -> Option<Located> {
        self.find(name).map(Located::File)
    }

    fn open(&self, name: &str) -> io::Result<Box<dyn Read + '_>> {
        let path = self.find(name).ok_or_else(|| not_found(name))?;
        Ok(Box::new(File::open(path)?))
    }
}

/// Entries of a zip archive on disk
///
/// The archive is reopened on every lookup so the context holds no file
/// handles between resolutions.
#[derive(Debug, Clone)]
pub struct ArchiveContext {
    archive: PathBuf,
}

impl ArchiveContext {
    pub fn new(archive: impl Into<PathBuf>) -> Self {
        Self {
            archive: archive.into(),
        }
    }

    pub fn archive(&self) -> &Path {
        &self.archive
    }

    /// Locator string for an entry, in `archive:` form
    pub fn locator(&self, name: &str) -> String {
        format!("archive:file:{}!/{}", self.archive.display(), normalize(name))
    }
}

impl LookupContext for ArchiveContext {
    fn locate(&self, name: &str) -> Option<Located> {
        let file = File::open(&self.archive).ok()?;
        let mut zip = zip::ZipArchive::new(file).ok()?;
        let found = zip.by_name(normalize(name)).is_ok_and(|entry| !entry.is_dir());
        found.then(|| Located::Packaged(self.locator(name)))
    }

    fn open(&self, name: &str) -> io::Result<Box<dyn Read + '_>> {
        Ok(Box::new(Cursor::new(read_zip_entry(
            &self.archive,
            normalize(name),
        )?)))
    }
}

const MAX_PREALLOC: u64 = 64 * 1024;

/// Read one file entry of a zip archive into memory
///
/// Directory entries are reported as not found.
pub(crate) fn read_zip_entry(archive: &Path, entry_name: &str) -> io::Result<Vec<u8>> {
    let file = File::open(archive)?;
    let mut zip = zip::ZipArchive::new(file).map_err(io::Error::other)?;
    let mut entry = zip.by_name(entry_name).map_err(|e| match e {
        zip::result::ZipError::FileNotFound => not_found(entry_name),
        other => io::Error::other(other),
    })?;
    if entry.is_dir() {
        return Err(not_found(entry_name));
    }

    // The header size is untrusted; it only hints the first allocation.
    let mut bytes = Vec::with_capacity(entry.size().min(MAX_PREALLOC) as usize);
    entry.read_to_end(&mut bytes)?;
    Ok(bytes)
}

/// A directory tree compiled into the binary
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedContext {
    dir: &'static Dir<'static>,
}

impl EmbeddedContext {
    pub fn new(dir: &'static Dir<'static>) -> Self {
        Self { dir }
    }

    /// The crate's own `resources/` tree
    pub fn bundled() -> Self {
        Self::new(&BUNDLED)
    }
}

impl LookupContext for EmbeddedContext {
    fn locate(&self, name: &str) -> Option<Located> {
        let name = normalize(name);
        self.dir
            .get_file(name)
            .map(|_| Located::Packaged(format!("embedded:{}", name)))
    }

    fn open(&self, name: &str) -> io::Result<Box<dyn Read + '_>> {
        let file = self
            .dir
            .get_file(normalize(name))
            .ok_or_else(|| not_found(name))?;
        Ok(Box::new(file.contents()))
    }
}

/// Several contexts searched in order; the first that knows a name wins
#[derive(Debug, Default)]
pub struct ContextChain {
    contexts: Vec<Box<dyn LookupContext>>,
}

impl ContextChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, context: impl LookupContext + 'static) -> Self {
        self.push(context);
        self
    }

    pub fn push(&mut self, context: impl LookupContext + 'static) {
        self.contexts.push(Box::new(context));
    }

    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }
}

impl LookupContext for ContextChain {
    fn locate(&self, name: &str) -> Option<Located> {
        self.contexts.iter().find_map(|ctx| ctx.locate(name))
    }

    fn open(&self, name: &str) -> io::Result<Box<dyn Read + '_>> {
        for ctx in &self.contexts {
            match ctx.open(name) {
                Ok(stream) => return Ok(stream),
                Err(e) => debug!("{:?} cannot open '{}': {}", ctx, name, e),
            }
        }
        Err(not_found(name))
    }
}
