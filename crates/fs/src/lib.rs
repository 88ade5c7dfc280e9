//! Filesystem abstraction over multiple storage backends
//!
//! This crate provides a uniform handle for reading files from local disk,
//! AWS S3, HTTP/HTTPS, Google Cloud Storage, and an in-process memory store.
//!
//! # Backends
//!
//! - **Local**: files on the local filesystem
//! - **S3**: objects in AWS S3 buckets (`s3://bucket/key` or `bucket/key`)
//! - **HTTP/HTTPS**: single URLs (no listing support)
//! - **GCS**: objects in Google Cloud Storage buckets (`gs://bucket/object`)
//! - **Memory**: in-process store, mainly for tests
//!
//! # Example
//!
//! ```ignore
//! use files_connection_fs::{FileSystem, LocalFs};
//!
//! let fs = FileSystem::Local(LocalFs::new());
//! let mut reader = fs.open("data/users.csv").await?;
//! let listed = fs.glob("data/*.csv").await?;
//! ```

mod gcs;
mod http;
mod local;
mod memory;
mod s3;

use anyhow::Result;

pub use gcs::{GcsConfig, GcsFs};
pub use http::HttpFs;
pub use local::LocalFs;
pub use memory::MemoryFs;
pub use s3::{S3Config, S3Fs};

/// Storage protocols with a built-in backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    /// Local filesystem
    File,
    /// AWS S3
    S3,
    /// HTTP/HTTPS URLs
    Http,
    /// Google Cloud Storage
    Gcs,
    /// In-process memory store
    Memory,
}

impl Protocol {
    /// Canonical protocol names, in the order reported by error messages.
    pub const NAMES: [&'static str; 5] = ["file", "s3", "http", "gcs", "memory"];

    /// Parse a protocol name, accepting common aliases.
    ///
    /// Unknown names are an error listing the supported protocols.
    pub fn parse(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "file" | "local" => Ok(Protocol::File),
            "s3" | "s3a" => Ok(Protocol::S3),
            "http" | "https" => Ok(Protocol::Http),
            "gcs" | "gs" => Ok(Protocol::Gcs),
            "memory" => Ok(Protocol::Memory),
            other => anyhow::bail!(
                "Unknown protocol '{other}', expected one of: {}",
                Self::NAMES.join(", ")
            ),
        }
    }

    /// Whether `name` maps to a known protocol.
    pub fn known(name: &str) -> bool {
        Self::parse(name).is_ok()
    }

    /// Canonical name for this protocol.
    pub fn name(&self) -> &'static str {
        match self {
            Protocol::File => "file",
            Protocol::S3 => "s3",
            Protocol::Http => "http",
            Protocol::Gcs => "gcs",
            Protocol::Memory => "memory",
        }
    }
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Handle over a storage backend, constructed once per connection and
/// reused across reads.
#[derive(Debug, Clone)]
pub enum FileSystem {
    Local(LocalFs),
    S3(S3Fs),
    Http(HttpFs),
    Gcs(GcsFs),
    Memory(MemoryFs),
}

impl FileSystem {
    /// The protocol this handle serves.
    pub fn protocol(&self) -> Protocol {
        match self {
            FileSystem::Local(_) => Protocol::File,
            FileSystem::S3(_) => Protocol::S3,
            FileSystem::Http(_) => Protocol::Http,
            FileSystem::Gcs(_) => Protocol::Gcs,
            FileSystem::Memory(_) => Protocol::Memory,
        }
    }

    /// Open `path` for reading.
    ///
    /// The whole object is fetched and returned as an in-memory reader,
    /// so backends behave uniformly under synchronous parsers.
    pub async fn open(&self, path: &str) -> Result<Box<dyn std::io::Read + Send>> {
        match self {
            FileSystem::Local(fs) => fs.open(path).await,
            FileSystem::S3(fs) => fs.open(path).await,
            FileSystem::Http(fs) => fs.open(path).await,
            FileSystem::Gcs(fs) => fs.open(path).await,
            FileSystem::Memory(fs) => fs.open(path),
        }
    }

    /// List the immediate children of a directory or prefix.
    ///
    /// Returned paths are full paths in the backend's own notation and are
    /// sorted for consistent ordering. HTTP does not support listing.
    pub async fn list(&self, path: &str) -> Result<Vec<String>> {
        match self {
            FileSystem::Local(fs) => fs.list(path).await,
            FileSystem::S3(fs) => fs.list(path).await,
            FileSystem::Http(_) => {
                anyhow::bail!("HTTP backend does not support listing: {path}")
            }
            FileSystem::Gcs(fs) => fs.list(path).await,
            FileSystem::Memory(fs) => fs.list(path),
        }
    }

    /// List paths matching a wildcard pattern.
    ///
    /// `*` and `?` wildcards are supported in the final path segment only,
    /// e.g. `data/*.csv`.
    pub async fn glob(&self, pattern: &str) -> Result<Vec<String>> {
        let (parent, name_pattern) = match pattern.rsplit_once('/') {
            Some((parent, name)) => (format!("{parent}/"), name),
            None => (String::new(), pattern),
        };
        if parent.contains(['*', '?']) {
            anyhow::bail!("Wildcards are only supported in the final path segment: {pattern}");
        }

        let listed = self.list(&parent).await?;
        Ok(listed
            .into_iter()
            .filter(|path| {
                let name = path.rsplit('/').next().unwrap_or(path);
                wildcard_match(name_pattern, name)
            })
            .collect())
    }
}

/// Get the file extension of a path, key, or URL (without the dot).
///
/// Query strings and fragments are ignored; dotless names yield `None`.
pub fn extension(path: &str) -> Option<&str> {
    let name = path.rsplit('/').next().unwrap_or(path);
    let name = name.split(['?', '#']).next().unwrap_or(name);
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => Some(ext),
        _ => None,
    }
}

/// Match a single path segment against a `*`/`?` wildcard pattern.
fn wildcard_match(pattern: &str, name: &str) -> bool {
    let pat: Vec<char> = pattern.chars().collect();
    let txt: Vec<char> = name.chars().collect();

    // Iterative matcher with star backtracking
    let (mut p, mut t) = (0, 0);
    let mut star: Option<(usize, usize)> = None;
    while t < txt.len() {
        if p < pat.len() && (pat[p] == '?' || pat[p] == txt[t]) {
            p += 1;
            t += 1;
        } else if p < pat.len() && pat[p] == '*' {
            star = Some((p, t));
            p += 1;
        } else if let Some((sp, st)) = star {
            p = sp + 1;
            t = st + 1;
            star = Some((sp, st + 1));
        } else {
            return false;
        }
    }
    while p < pat.len() && pat[p] == '*' {
        p += 1;
    }
    p == pat.len()
}
