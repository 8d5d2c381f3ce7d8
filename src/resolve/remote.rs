//! Opening resource names as URLs
//!
//! Three locator forms are understood:
//!
//! ```text
//! https://example.com/data.txt                 → HTTP GET via reqwest
//! file:///abs/data.txt, file:rel/data.txt      → local file
//! archive:file:./bundle.zip!/META-INF/MANIFEST.MF → zip entry
//! ```
//!
//! Any failure to open (bad URL, DNS failure, non-success status) is
//! reported as an `io::Error` and treated by the resolver as "not this
//! strategy". Errors while reading an already-open stream are the caller's
//! to surface.

use crate::config::RemoteSettings;
use reqwest::Url;
use reqwest::blocking::Client;
use std::fs::File;
use std::io::{self, Cursor, Read};
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::{debug, warn};

use super::context::read_zip_entry;

/// A resource name recognized as a URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteLocator {
    Http(Url),
    File(PathBuf),
    Archive { archive: PathBuf, entry: String },
}

impl RemoteLocator {
    /// Recognize a URL-shaped name; anything else is `None`
    pub fn parse(name: &str) -> Option<RemoteLocator> {
        if let Some(rest) = name.strip_prefix("archive:") {
            let (archive, entry) = rest.split_once("!/")?;
            let archive = file_path(archive.strip_prefix("file:").unwrap_or(archive))?;
            if entry.is_empty() || archive.as_os_str().is_empty() {
                return None;
            }
            return Some(RemoteLocator::Archive {
                archive,
                entry: entry.to_string(),
            });
        }

        if name.starts_with("file:") {
            let path = if name.starts_with("file://") {
                Url::parse(name).ok()?.to_file_path().ok()?
            } else {
                file_path(&name["file:".len()..])?
            };
            return Some(RemoteLocator::File(path));
        }

        if name.starts_with("http://") || name.starts_with("https://") {
            return Url::parse(name).ok().map(RemoteLocator::Http);
        }

        None
    }
}

/// A path written after `file:`, either `//`-rooted or relative
fn file_path(rest: &str) -> Option<PathBuf> {
    if rest.starts_with("//") {
        Url::parse(&format!("file:{}", rest)).ok()?.to_file_path().ok()
    } else if rest.is_empty() {
        None
    } else {
        Some(PathBuf::from(rest))
    }
}

/// Opens [`RemoteLocator`]s, building the HTTP client on first use
#[derive(Debug, Default)]
pub struct RemoteOpener {
    settings: RemoteSettings,
    client: OnceLock<Option<Client>>,
}

impl RemoteOpener {
    pub fn new(settings: RemoteSettings) -> Self {
        Self {
            settings,
            client: OnceLock::new(),
        }
    }

    pub fn settings(&self) -> &RemoteSettings {
        &self.settings
    }

    fn client(&self) -> io::Result<&Client> {
        self.client
            .get_or_init(|| {
                let mut builder = Client::builder()
                    .user_agent(self.settings.user_agent.clone())
                    .timeout(self.settings.timeout_secs.map(Duration::from_secs));
                if !self.settings.system_proxy {
                    builder = builder.no_proxy();
                }
                builder
                    .build()
                    .inspect_err(|e| warn!("Failed to build HTTP client: {}", e))
                    .ok()
            })
            .as_ref()
            .ok_or_else(|| io::Error::other("HTTP client unavailable"))
    }

    /// Open a locator as a byte stream
    pub fn open(&self, locator: &RemoteLocator) -> io::Result<Box<dyn Read + '_>> {
        match locator {
            RemoteLocator::Http(url) => {
                debug!("Sending HTTP GET request to {}", url);
                let response = self
                    .client()?
                    .get(url.clone())
                    .send()
                    .map_err(io::Error::other)?;

                let status = response.status();
                if !status.is_success() {
                    return Err(io::Error::other(format!(
                        "{} returned status {}",
                        url, status
                    )));
                }
                Ok(Box::new(response))
            }
            RemoteLocator::File(path) => Ok(Box::new(File::open(path)?)),
            RemoteLocator::Archive { archive, entry } => {
                Ok(Box::new(Cursor::new(read_zip_entry(archive, entry)?)))
            }
        }
    }
}
