//! Common test utilities and fixtures
//!
//! This module provides shared test helpers for locus tests.

#![allow(dead_code)]

use std::fs::File;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};
use tempfile::TempDir;

pub const MANIFEST: &str = "Manifest-Version: 1.0\nCreated-By: fixture\n";

/// Creates a temporary directory for test fixtures
pub fn create_temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

/// Write a file, creating parent directories
pub fn write_file(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create fixture directory");
    }
    std::fs::write(&path, content).expect("Failed to write fixture");
    path
}

/// Write a stored (uncompressed) zip archive with the given entries
pub fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
    let file = File::create(path).expect("Failed to create archive");
    let mut zip = zip::ZipWriter::new(file);
    let options =
        zip::write::SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    for (name, bytes) in entries {
        zip.start_file(*name, options).expect("Failed to start entry");
        zip.write_all(bytes).expect("Failed to write entry");
    }
    zip.finish().expect("Failed to finish archive");
}

/// A `bundle.zip` holding `META-INF/MANIFEST.MF` and `data/config.json`
pub fn manifest_archive(dir: &Path) -> PathBuf {
    let archive = dir.join("bundle.zip");
    write_zip(
        &archive,
        &[
            ("META-INF/MANIFEST.MF", MANIFEST.as_bytes()),
            ("data/config.json", b"{\"debug\": true}"),
        ],
    );
    archive
}

/// Serve `requests` HTTP responses with a fixed status and body
///
/// Returns the base URL (`http://127.0.0.1:<port>`) and the server thread.
pub fn serve(status: &'static str, body: &'static [u8], requests: usize) -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind test server");
    let addr = listener.local_addr().expect("Failed to read local address");

    let handle = thread::spawn(move || {
        for stream in listener.incoming().take(requests) {
            let Ok(mut stream) = stream else { continue };
            let mut request = [0u8; 4096];
            let _ = stream.read(&mut request);
            let header = format!(
                "HTTP/1.1 {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                status,
                body.len()
            );
            let _ = stream.write_all(header.as_bytes());
            let _ = stream.write_all(body);
            let _ = stream.flush();
        }
    });

    (format!("http://{}", addr), handle)
}
