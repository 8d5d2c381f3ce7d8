//! `resolve`, `cat`, `lines`, `exists` and `inspect`

use super::Session;
use crate::naming;
use crate::types::{ResourceKind, Strategy};
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Serialize)]
struct ResolveReport<'a> {
    name: &'a str,
    path: PathBuf,
    temporary: bool,
    strategy: Strategy,
    kept: bool,
}

/// Resolve a name and report where it landed
///
/// Temporary copies are deleted before this returns unless `keep` is set,
/// so without it the printed path only says where the copy was made.
pub fn resolve(session: &Session, name: &str, keep: bool, json: bool) -> Result<()> {
    let resource = session
        .resolver
        .resolve(name, &session.context)
        .with_context(|| format!("Failed to resolve '{}'", name))?;

    let temporary = resource.is_temporary();
    let strategy = resource.strategy();
    let path = if keep {
        resource.keep().context("Failed to keep resolved file")?
    } else {
        resource.path().to_path_buf()
    };

    let report = ResolveReport {
        name,
        path,
        temporary,
        strategy,
        kept: keep && temporary,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.path.display());
        println!("  strategy:  {}", report.strategy);
        println!(
            "  temporary: {}",
            match (report.temporary, report.kept) {
                (false, _) => "no",
                (true, true) => "yes (kept)",
                (true, false) => "yes (already deleted, use --keep to retain it)",
            }
        );
    }

    Ok(())
}

/// Print the text content of a resource
pub fn cat(session: &Session, name: &str) -> Result<()> {
    let text = session
        .resolver
        .read_as_text(name, &session.context)
        .with_context(|| format!("Failed to read '{}'", name))?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// Print the lines of a resource, numbered from 1
pub fn lines(session: &Session, name: &str) -> Result<()> {
    let lines = session
        .resolver
        .read_as_lines(name, &session.context)
        .with_context(|| format!("Failed to read '{}'", name))?;

    let width = lines.len().to_string().len();
    for (i, line) in lines.iter().enumerate() {
        println!("{:>width$}  {}", i + 1, line, width = width);
    }
    Ok(())
}

/// Whether a name resolves to an existing regular file
pub fn exists(session: &Session, name: &str) -> bool {
    session.resolver.exists(name, &session.context)
}

#[derive(Debug, Serialize)]
struct NameReport<'a> {
    directory: &'a str,
    leaf: &'a str,
    stem: &'a str,
    extension: Option<&'a str>,
    kind: Option<ResourceKind>,
}

/// Print how a name splits into its parts, without any I/O
pub fn inspect(name: &str, json: bool) -> Result<()> {
    let (directory, leaf) = naming::split(name);
    let report = NameReport {
        directory,
        leaf,
        stem: naming::file_stem(name),
        extension: naming::extension(name),
        kind: ResourceKind::from_name(name),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("directory: {}", report.directory);
        println!("leaf:      {}", report.leaf);
        println!("stem:      {}", report.stem);
        println!("extension: {}", report.extension.unwrap_or("-"));
        println!(
            "kind:      {}",
            report
                .kind
                .map_or_else(|| "unsupported".to_string(), |k| k.to_string())
        );
    }
    Ok(())
}
