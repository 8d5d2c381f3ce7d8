//! Configuration management for locus
//!
//! ## Architecture
//!
//! - `schema` - Configuration data structures
//! - `io` - Reading, writing, and updating config files
//! - `paths` - Directory path management
//!
//! ## Usage
//!
//! ```rust,no_run
//! use locus::config;
//!
//! # fn example() -> anyhow::Result<()> {
//! // Load config (returns default if file doesn't exist)
//! let config = config::load_config()?;
//!
//! let resolver = config.resolver();
//! let context = config.context(true);
//! let text = resolver.read_as_text("templates/greeting.txt", &context)?;
//! # Ok(())
//! # }
//! ```

pub mod io;
pub mod paths;
pub mod schema;

pub use io::{
    load_config, load_config_from, register_archive, register_resource_dir, save_config_to,
};
pub use paths::{get_config_path, get_locus_dir, get_log_dir};
pub use schema::{ChainSettings, LocusConfig, RemoteSettings, ScratchSettings};

use crate::resolve::{ArchiveContext, ContextChain, DirectoryContext, EmbeddedContext, Resolver};

impl LocusConfig {
    /// Build a resolver from the `[scratch]`, `[resolver]` and `[remote]` sections
    pub fn resolver(&self) -> Resolver {
        Resolver::new()
            .with_scratch(self.scratch.clone())
            .with_literal_fallback(self.resolver.literal_fallback)
            .with_remote(self.remote.clone())
    }

    /// Build the lookup context: resource directories, then archives, then
    /// (optionally) the resources compiled into this crate
    pub fn context(&self, include_bundled: bool) -> ContextChain {
        let mut chain = ContextChain::new();

        if let Some((first, rest)) = self.resource_dirs.split_first() {
            let dirs = rest
                .iter()
                .fold(DirectoryContext::new(first), |ctx, dir| ctx.with_root(dir));
            chain.push(dirs);
        }

        for archive in &self.archives {
            chain.push(ArchiveContext::new(archive));
        }

        if include_bundled {
            chain.push(EmbeddedContext::bundled());
        }

        chain
    }
}
