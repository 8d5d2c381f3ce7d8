use super::Session;
use crate::expand::{Variables, expand_resource};
use anyhow::{Context, Result};

/// Expand a template resource with `KEY=VALUE` variables and print it
pub fn expand(session: &Session, name: &str, vars: &[String]) -> Result<()> {
    let vars = Variables::from_pairs(vars).map_err(|e| anyhow::anyhow!("invalid --var: {}", e))?;

    let text = expand_resource(&session.resolver, name, &session.context, &vars)
        .with_context(|| format!("Failed to expand '{}'", name))?;

    print!("{}", text);
    Ok(())
}
