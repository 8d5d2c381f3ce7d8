pub mod commands;
pub mod config;
pub mod error;
pub mod expand;
pub mod logging;
pub mod naming;
pub mod resolve;
pub mod types;

pub use error::{ExpandError, ResolveError};
pub use resolve::{
    LookupContext, ResolvedResource, Resolver, exists, read_as_bytes, read_as_lines,
    read_as_text, resolve,
};
pub use types::{ResourceKind, Strategy};
