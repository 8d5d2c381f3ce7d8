//! CLI command implementations
//!
//! Each command works against a [`Session`]: the resolver and lookup
//! context assembled from the config file plus command-line overrides.

pub mod config;
pub mod expand;
pub mod resolve;

use crate::config::LocusConfig;
use crate::resolve::{ContextChain, Resolver};

/// Resolver plus the namespace it searches
#[derive(Debug)]
pub struct Session {
    pub resolver: Resolver,
    pub context: ContextChain,
}

impl Session {
    pub fn new(config: &LocusConfig, include_bundled: bool) -> Self {
        Self {
            resolver: config.resolver(),
            context: config.context(include_bundled),
        }
    }
}
