use crate::config::get_log_dir;
use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when `RUST_LOG` is unset
fn default_filter(verbose: bool) -> &'static str {
    if verbose { "locus=debug" } else { "locus=warn" }
}

/// Install the file and stderr tracing layers
///
/// The file layer rolls daily under [`get_log_dir`] as `locus.log.<date>`
/// and records targets, thread ids and line numbers. The stderr layer is
/// compact and only shows what the filter lets through, which is warnings
/// unless `verbose` is set. `RUST_LOG` replaces the filter entirely:
///
/// ```text
/// RUST_LOG=locus::resolve=trace locus cat META-INF/MANIFEST.MF
/// ```
pub fn init(verbose: bool) -> Result<()> {
    let log_dir = get_log_dir()?;

    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "locus.log");

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_line_number(true),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init()
        .context("Failed to initialize tracing subscriber")?;

    tracing::debug!("Logging initialized to {}", log_dir.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter(false), "locus=warn");
        assert_eq!(default_filter(true), "locus=debug");
    }
}
