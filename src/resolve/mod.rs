//! Resource resolution
//!
//! [`Resolver::resolve`] turns a resource name into a locally readable file
//! by trying, in order:
//!
//! ```text
//! 1. filesystem  name is an existing regular file             → as is
//! 2. bundled     context locates a loose file                 → as is
//!                (a packaged match is skipped on purpose)
//! 3. packaged    context opens the name as a stream           → scratch copy
//! 4. remote      name opens as an http(s)/file/archive URL    → scratch copy
//! 5. fallback    the name as an absolute path, unchecked      → as is
//! ```
//!
//! The first strategy that finds something wins and later ones never run.
//! A strategy that cannot handle the name is skipped silently; only a
//! failure while copying an already-open stream stops the chain.
//!
//! Scratch copies are deleted when the [`ResolvedResource`] is dropped.

pub mod context;
pub mod remote;
pub mod scratch;

pub use context::{
    ArchiveContext, ContextChain, DirectoryContext, EmbeddedContext, Located, LookupContext,
};
pub use remote::{RemoteLocator, RemoteOpener};

use crate::config::{RemoteSettings, ScratchSettings};
use crate::error::ResolveError;
use crate::types::Strategy;
use scratch::ScratchFile;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, info, instrument};

/// A resource materialized as a local file
#[derive(Debug)]
pub struct ResolvedResource {
    path: PathBuf,
    strategy: Strategy,
    scratch: Option<ScratchFile>,
}

impl ResolvedResource {
    fn local(path: PathBuf, strategy: Strategy) -> Self {
        Self {
            path,
            strategy,
            scratch: None,
        }
    }

    fn temporary(scratch: ScratchFile, strategy: Strategy) -> Self {
        Self {
            path: scratch.path().to_path_buf(),
            strategy,
            scratch: Some(scratch),
        }
    }

    /// Absolute path of the local file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the file is a scratch copy deleted on drop
    pub fn is_temporary(&self) -> bool {
        self.scratch.is_some()
    }

    /// Which strategy produced this resource
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Give up ownership of the file, keeping it on disk if temporary
    pub fn keep(self) -> io::Result<PathBuf> {
        match self.scratch {
            Some(scratch) => scratch.keep(),
            None => Ok(self.path),
        }
    }
}

impl AsRef<Path> for ResolvedResource {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

/// Outcome of a single strategy
enum Attempt {
    Found(ResolvedResource),
    NotApplicable,
    Fatal(ResolveError),
}

type StrategyFn = fn(&Resolver, &str, &dyn LookupContext) -> Attempt;

const CHAIN: [(Strategy, StrategyFn); 4] = [
    (Strategy::Filesystem, Resolver::from_filesystem),
    (Strategy::Bundled, Resolver::from_bundled),
    (Strategy::Packaged, Resolver::from_packaged),
    (Strategy::Remote, Resolver::from_remote),
];

/// Resolves resource names against a lookup context
#[derive(Debug)]
pub struct Resolver {
    scratch: ScratchSettings,
    literal_fallback: bool,
    remote: RemoteOpener,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolver {
    pub fn new() -> Self {
        Self {
            scratch: ScratchSettings::default(),
            literal_fallback: true,
            remote: RemoteOpener::default(),
        }
    }

    pub fn with_scratch(mut self, scratch: ScratchSettings) -> Self {
        self.scratch = scratch;
        self
    }

    pub fn with_literal_fallback(mut self, enabled: bool) -> Self {
        self.literal_fallback = enabled;
        self
    }

    pub fn with_remote(mut self, settings: RemoteSettings) -> Self {
        self.remote = RemoteOpener::new(settings);
        self
    }

    /// Resolve a name to a local file
    ///
    /// # Errors
    ///
    /// - `InvalidResourceName` for an empty name or one no path can hold
    /// - `IoFailure` when a located stream cannot be copied to a scratch file
    /// - `NotFound` when every strategy falls through and the literal
    ///   fallback is disabled
    #[instrument(level = "debug", skip(self, ctx))]
    pub fn resolve(
        &self,
        name: &str,
        ctx: &dyn LookupContext,
    ) -> Result<ResolvedResource, ResolveError> {
        if name.is_empty() {
            return Err(ResolveError::invalid(name, "resource name is empty"));
        }
        if name.contains('\0') {
            return Err(ResolveError::invalid(name, "resource name contains a NUL byte"));
        }

        for (strategy, attempt) in CHAIN {
            match attempt(self, name, ctx) {
                Attempt::Found(resource) => {
                    info!(
                        "Resolved '{}' via {} → {}",
                        name,
                        strategy,
                        resource.path().display()
                    );
                    return Ok(resource);
                }
                Attempt::NotApplicable => debug!("{} strategy skipped '{}'", strategy, name),
                Attempt::Fatal(e) => return Err(e),
            }
        }

        self.fallback(name)
    }

    fn fallback(&self, name: &str) -> Result<ResolvedResource, ResolveError> {
        if !self.literal_fallback {
            return Err(ResolveError::NotFound {
                name: name.to_string(),
            });
        }

        let path = std::path::absolute(name).map_err(|e| ResolveError::invalid(name, e.to_string()))?;
        debug!("Falling back to literal path {}", path.display());
        Ok(ResolvedResource::local(path, Strategy::Fallback))
    }

    fn from_filesystem(&self, name: &str, _ctx: &dyn LookupContext) -> Attempt {
        let path = Path::new(name);
        if !path.is_file() {
            return Attempt::NotApplicable;
        }
        match std::path::absolute(path) {
            Ok(path) => Attempt::Found(ResolvedResource::local(path, Strategy::Filesystem)),
            Err(_) => Attempt::NotApplicable,
        }
    }

    fn from_bundled(&self, name: &str, ctx: &dyn LookupContext) -> Attempt {
        match ctx.locate(name) {
            Some(Located::File(path)) => match std::path::absolute(&path) {
                Ok(path) => Attempt::Found(ResolvedResource::local(path, Strategy::Bundled)),
                Err(_) => Attempt::NotApplicable,
            },
            Some(Located::Packaged(locator)) => {
                // No file handle exists for a packaged entry; the packaged
                // strategy reopens it as a stream.
                debug!("'{}' is packaged at {}", name, locator);
                Attempt::NotApplicable
            }
            None => Attempt::NotApplicable,
        }
    }

    fn from_packaged(&self, name: &str, ctx: &dyn LookupContext) -> Attempt {
        match ctx.open(name) {
            Ok(stream) => self.materialize(name, stream, Strategy::Packaged),
            Err(e) => {
                debug!("Cannot open '{}' from lookup context: {}", name, e);
                Attempt::NotApplicable
            }
        }
    }

    fn from_remote(&self, name: &str, _ctx: &dyn LookupContext) -> Attempt {
        if !self.remote.settings().enabled {
            return Attempt::NotApplicable;
        }
        let Some(locator) = RemoteLocator::parse(name) else {
            return Attempt::NotApplicable;
        };

        match self.remote.open(&locator) {
            Ok(stream) => self.materialize(name, stream, Strategy::Remote),
            Err(e) => {
                debug!("Cannot open '{}' as a URL: {}", name, e);
                Attempt::NotApplicable
            }
        }
    }

    fn materialize(&self, name: &str, mut stream: impl Read, strategy: Strategy) -> Attempt {
        let copied = scratch::create(&self.scratch.prefix, &self.scratch.suffix).and_then(
            |(mut file, scratch)| {
                let bytes = io::copy(&mut stream, &mut file)?;
                debug!("Copied {} bytes into {}", bytes, scratch.path().display());
                Ok(scratch)
            },
        );

        match copied {
            Ok(scratch) => Attempt::Found(ResolvedResource::temporary(scratch, strategy)),
            Err(e) => Attempt::Fatal(ResolveError::io(name, e)),
        }
    }

    /// Resolve and read the whole file
    pub fn read_as_bytes(
        &self,
        name: &str,
        ctx: &dyn LookupContext,
    ) -> Result<Vec<u8>, ResolveError> {
        let resource = self.resolve(name, ctx)?;
        std::fs::read(resource.path()).map_err(|e| ResolveError::io(name, e))
    }

    /// Resolve and read the whole file as UTF-8
    pub fn read_as_text(&self, name: &str, ctx: &dyn LookupContext) -> Result<String, ResolveError> {
        let bytes = self.read_as_bytes(name, ctx)?;
        String::from_utf8(bytes)
            .map_err(|e| ResolveError::io(name, io::Error::new(io::ErrorKind::InvalidData, e)))
    }

    /// Resolve, read as UTF-8 and split on `\n`
    ///
    /// Carriage returns are kept. Trailing empty lines are dropped, so
    /// `"a\nb\n"` yields `["a", "b"]`; text without any line feed comes back
    /// as a single line, even when empty.
    pub fn read_as_lines(
        &self,
        name: &str,
        ctx: &dyn LookupContext,
    ) -> Result<Vec<String>, ResolveError> {
        Ok(split_lines(&self.read_as_text(name, ctx)?))
    }

    /// Whether the name resolves to an existing regular file
    ///
    /// Every resolution error counts as `false`; call [`Resolver::resolve`]
    /// to find out why.
    pub fn exists(&self, name: &str, ctx: &dyn LookupContext) -> bool {
        match self.resolve(name, ctx) {
            Ok(resource) => resource.path().is_file(),
            Err(e) => {
                debug!("'{}' does not exist: {}", name, e);
                false
            }
        }
    }
}

fn split_lines(text: &str) -> Vec<String> {
    if !text.contains('\n') {
        return vec![text.to_string()];
    }

    let mut lines: Vec<String> = text.split('\n').map(str::to_string).collect();
    while lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines
}

static DEFAULT_RESOLVER: LazyLock<Resolver> = LazyLock::new(Resolver::default);

/// [`Resolver::resolve`] with default settings
pub fn resolve(name: &str, ctx: &dyn LookupContext) -> Result<ResolvedResource, ResolveError> {
    DEFAULT_RESOLVER.resolve(name, ctx)
}

/// [`Resolver::read_as_bytes`] with default settings
pub fn read_as_bytes(name: &str, ctx: &dyn LookupContext) -> Result<Vec<u8>, ResolveError> {
    DEFAULT_RESOLVER.read_as_bytes(name, ctx)
}

/// [`Resolver::read_as_text`] with default settings
pub fn read_as_text(name: &str, ctx: &dyn LookupContext) -> Result<String, ResolveError> {
    DEFAULT_RESOLVER.read_as_text(name, ctx)
}

/// [`Resolver::read_as_lines`] with default settings
pub fn read_as_lines(name: &str, ctx: &dyn LookupContext) -> Result<Vec<String>, ResolveError> {
    DEFAULT_RESOLVER.read_as_lines(name, ctx)
}

/// [`Resolver::exists`] with default settings
pub fn exists(name: &str, ctx: &dyn LookupContext) -> bool {
    DEFAULT_RESOLVER.exists(name, ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// A context whose stream fails partway through
    #[derive(Debug)]
    struct BrokenStream;

    impl Read for BrokenStream {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("stream truncated"))
        }
    }

    #[derive(Debug)]
    struct BrokenContext;

    impl LookupContext for BrokenContext {
        fn locate(&self, _name: &str) -> Option<Located> {
            Some(Located::Packaged("broken:".to_string()))
        }

        fn open(&self, _name: &str) -> io::Result<Box<dyn Read + '_>> {
            Ok(Box::new(BrokenStream))
        }
    }

    fn offline() -> Resolver {
        Resolver::new().with_remote(RemoteSettings {
            enabled: false,
            ..RemoteSettings::default()
        })
    }

    #[test]
    fn test_split_lines() {
        assert_eq!(split_lines("hello\nworld"), vec!["hello", "world"]);
        assert_eq!(split_lines("hello\nworld\n\n"), vec!["hello", "world"]);
        assert_eq!(split_lines("a\r\nb"), vec!["a\r", "b"]);
        assert_eq!(split_lines("\na"), vec!["", "a"]);
        assert_eq!(split_lines(""), vec![""]);
        assert!(split_lines("\n\n").is_empty());
    }

    #[test]
    fn test_empty_name_is_invalid() {
        let ctx = ContextChain::default();
        assert!(matches!(
            offline().resolve("", &ctx),
            Err(ResolveError::InvalidResourceName { .. })
        ));
        assert!(!offline().exists("", &ctx));
    }

    #[test]
    fn test_whitespace_name_is_a_valid_file_name() {
        let root = TempDir::new().unwrap();
        let file = root.path().join("  ");
        fs::write(&file, "blank name").unwrap();
        let ctx = DirectoryContext::new(root.path());

        let resource = offline().resolve("  ", &ctx).unwrap();

        assert_eq!(resource.path(), file);
        assert!(!resource.is_temporary());
        assert!(offline().exists("  ", &ctx));
    }

    #[test]
    fn test_nul_byte_is_invalid() {
        let result = offline().resolve("a\0b", &ContextChain::default());
        assert!(matches!(result, Err(ResolveError::InvalidResourceName { .. })));
    }

    #[test]
    fn test_filesystem_wins_over_context() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("data.txt");
        fs::write(&file, "disk").unwrap();

        let name = file.to_str().unwrap();
        let resource = offline().resolve(name, &BrokenContext).unwrap();

        assert_eq!(resource.path(), file);
        assert!(!resource.is_temporary());
        assert_eq!(resource.strategy(), Strategy::Filesystem);
    }

    #[test]
    fn test_directory_is_not_a_filesystem_match() {
        let temp = TempDir::new().unwrap();
        let name = temp.path().to_str().unwrap();

        let resource = offline().resolve(name, &ContextChain::default()).unwrap();

        assert_eq!(resource.strategy(), Strategy::Fallback);
        assert!(!offline().exists(name, &ContextChain::default()));
    }

    #[test]
    fn test_copy_failure_is_fatal() {
        let result = offline().resolve("anything", &BrokenContext);

        match result {
            Err(ResolveError::IoFailure { name, source }) => {
                assert_eq!(name, "anything");
                assert!(source.to_string().contains("stream truncated"));
            }
            other => panic!("expected IoFailure, got {:?}", other),
        }
        assert!(!offline().exists("anything", &BrokenContext));
    }

    #[test]
    fn test_disabled_fallback_reports_not_found() {
        let resolver = offline().with_literal_fallback(false);

        let result = resolver.resolve("no/such/resource.txt", &ContextChain::default());

        assert!(matches!(result, Err(ResolveError::NotFound { .. })));
    }

    #[test]
    fn test_fallback_is_absolute_and_unchecked() {
        let resource = offline()
            .resolve("no/such/resource.txt", &ContextChain::default())
            .unwrap();

        assert!(resource.path().is_absolute());
        assert!(resource.path().ends_with("no/such/resource.txt"));
        assert!(!resource.path().exists());
        assert!(!resource.is_temporary());
    }

    #[test]
    fn test_keep_on_local_resource_returns_path() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("keep.txt");
        fs::write(&file, "x").unwrap();

        let resource = offline()
            .resolve(file.to_str().unwrap(), &ContextChain::default())
            .unwrap();

        assert_eq!(resource.keep().unwrap(), file);
        assert!(file.exists());
    }

    #[test]
    fn test_custom_scratch_naming() {
        let resolver = offline().with_scratch(ScratchSettings {
            prefix: "custom-".to_string(),
            suffix: ".bin".to_string(),
        });

        let resource = resolver
            .resolve("META-INF/MANIFEST.MF", &EmbeddedContext::bundled())
            .unwrap();

        let file_name = resource.path().file_name().unwrap().to_str().unwrap();
        assert!(file_name.starts_with("custom-"));
        assert!(file_name.ends_with(".bin"));
    }
}
