//! Error types for resource resolution and template expansion

use std::io;
use thiserror::Error;

/// Errors surfaced by the resolver
///
/// Failures inside a single strategy (a missing file, an unknown bundled
/// name, an unreachable URL) never show up here; they only move the chain
/// on to the next strategy.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ResolveError {
    /// No strategy produced a resource and the literal fallback is disabled
    #[error("resource not found: '{name}'")]
    NotFound {
        /// The requested resource name
        name: String,
    },

    /// A located resource could not be copied or read
    #[error("failed to read resource '{name}': {source}")]
    IoFailure {
        /// The requested resource name
        name: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The name cannot be interpreted by any strategy
    #[error("invalid resource name '{name}': {reason}")]
    InvalidResourceName {
        /// The requested resource name
        name: String,
        /// Why the name was rejected
        reason: String,
    },
}

impl ResolveError {
    pub(crate) fn io(name: &str, source: io::Error) -> Self {
        Self::IoFailure {
            name: name.to_string(),
            source,
        }
    }

    pub(crate) fn invalid(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidResourceName {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors surfaced while expanding `${var}` templates
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ExpandError {
    /// The template references a variable missing from the table
    #[error("unknown template variable '{0}'")]
    UnknownVariable(String),

    /// The template resource itself could not be read
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}
