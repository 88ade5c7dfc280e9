//! Local filesystem backend

use anyhow::{Context, Result};
use std::path::Path;

/// Reads files from the local filesystem.
#[derive(Debug, Clone, Default)]
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        LocalFs
    }

    /// Open a local file and return an in-memory reader.
    pub async fn open(&self, path: &str) -> Result<Box<dyn std::io::Read + Send>> {
        let path = strip_scheme(path);
        let contents = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read file: {path}"))?;
        Ok(Box::new(std::io::Cursor::new(contents)))
    }

    /// List all files in a directory (non-recursive, immediate children only).
    ///
    /// Returns only files, not subdirectories.
    pub async fn list(&self, path: &str) -> Result<Vec<String>> {
        let path = strip_scheme(path);
        let dir = if path.is_empty() { "." } else { path };
        let mut results = Vec::new();

        let mut entries = tokio::fs::read_dir(Path::new(dir))
            .await
            .with_context(|| format!("Failed to read directory: {dir}"))?;

        while let Some(entry) = entries.next_entry().await? {
            let entry_path = entry.path();
            let metadata = entry
                .metadata()
                .await
                .with_context(|| format!("Failed to get metadata for: {}", entry_path.display()))?;

            if metadata.is_file() {
                results.push(entry_path.to_string_lossy().into_owned());
            }
        }

        // Sort for consistent ordering
        results.sort();

        tracing::debug!("Listed {} files in directory: {dir}", results.len());

        Ok(results)
    }
}

fn strip_scheme(path: &str) -> &str {
    path.strip_prefix("file://").unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_open_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.txt");
        std::fs::write(&file_path, "hello world").unwrap();

        let fs = LocalFs::new();
        let mut reader = fs.open(file_path.to_str().unwrap()).await.unwrap();
        let mut contents = String::new();
        reader.read_to_string(&mut contents).unwrap();

        assert_eq!(contents, "hello world");
    }

    #[tokio::test]
    async fn test_open_missing_file() {
        let fs = LocalFs::new();
        let err = fs.open("/nonexistent/file.txt").await.err().unwrap();
        assert!(err.to_string().contains("Failed to read file"));
    }

    #[tokio::test]
    async fn test_open_file_scheme() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.txt");
        std::fs::write(&file_path, "scheme").unwrap();

        let fs = LocalFs::new();
        let uri = format!("file://{}", file_path.display());
        let mut reader = fs.open(&uri).await.unwrap();
        let mut contents = String::new();
        reader.read_to_string(&mut contents).unwrap();
        assert_eq!(contents, "scheme");
    }

    #[tokio::test]
    async fn test_list_directory() {
        let temp_dir = TempDir::new().unwrap();

        std::fs::write(temp_dir.path().join("file1.csv"), "data1").unwrap();
        std::fs::write(temp_dir.path().join("file2.jsonl"), "data2").unwrap();

        // Subdirectories and their contents are skipped
        std::fs::create_dir(temp_dir.path().join("subdir")).unwrap();
        std::fs::write(temp_dir.path().join("subdir/nested.csv"), "nested").unwrap();

        let fs = LocalFs::new();
        let results = fs.list(temp_dir.path().to_str().unwrap()).await.unwrap();

        assert_eq!(results.len(), 2);
        assert!(results[0].ends_with("file1.csv"));
        assert!(results[1].ends_with("file2.jsonl"));
    }

    #[tokio::test]
    async fn test_list_directory_not_found() {
        let fs = LocalFs::new();
        assert!(fs.list("/nonexistent/path").await.is_err());
    }
}
