//! In-process memory backend
//!
//! Stores file contents in a shared map. Used by tests and demos where a
//! real storage backend would be overkill.

use anyhow::Result;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

/// In-memory file store keyed by path.
///
/// Cloning the handle shares the underlying store.
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    files: Arc<Mutex<BTreeMap<String, Vec<u8>>>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store file contents under `path`, replacing any previous contents.
    pub fn put(&self, path: &str, contents: Vec<u8>) {
        let path = strip_scheme(path).to_string();
        self.files.lock().expect("memory fs lock").insert(path, contents);
    }

    /// Open a stored file and return an in-memory reader.
    pub fn open(&self, path: &str) -> Result<Box<dyn std::io::Read + Send>> {
        let path = strip_scheme(path);
        let files = self.files.lock().expect("memory fs lock");
        match files.get(path) {
            Some(contents) => Ok(Box::new(std::io::Cursor::new(contents.clone()))),
            None => anyhow::bail!("No such file in memory filesystem: {path}"),
        }
    }

    /// List paths under a prefix (immediate children only).
    pub fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let prefix = strip_scheme(prefix);
        let files = self.files.lock().expect("memory fs lock");
        let results = files
            .keys()
            .filter(|path| {
                path.strip_prefix(prefix)
                    .map(|rest| !rest.is_empty() && !rest.contains('/'))
                    .unwrap_or(false)
            })
            .cloned()
            .collect();
        Ok(results)
    }
}

fn strip_scheme(path: &str) -> &str {
    path.strip_prefix("memory://").unwrap_or(path)
}
