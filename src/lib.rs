//! files-connection
//!
//! Connects an application to arbitrary file storage through a uniform
//! filesystem abstraction, with per-call result caching.
//!
//! # Overview
//!
//! A [`FilesConnection`] resolves a named set of secrets into a backend
//! filesystem handle (local disk, S3, GCS, HTTP, or an in-memory store),
//! then serves:
//!
//! - pass-through file opens ([`FilesConnection::open`])
//! - format-dispatched reads ([`FilesConnection::read`]) for text, CSV,
//!   JSON, JSONL, and Parquet, with the format inferred from the file
//!   extension when unspecified
//! - TTL-based memoization of parsed results
//!
//! Protocol access and parsing are delegated entirely to the backend and
//! format crates; this library is configuration and dispatch.
//!
//! # Example
//!
//! ```ignore
//! use files_connection::{FilesConnection, SecretsStore};
//!
//! let store = SecretsStore::load_default()?;
//! let conn = FilesConnection::from_store(&store, "my_s3", None).await?;
//!
//! let frame = conn.read_csv("my-bucket/users.csv", None, &Default::default()).await?;
//! let text = conn.read_text("my-bucket/README.txt", None).await?;
//! ```

mod cache;
mod connection;
mod secrets;

pub use connection::FilesConnection;
pub use secrets::{Secrets, SecretsStore, DEFAULT_SECRETS_PATH, SECRETS_PATH_ENV};

// Re-export the format and filesystem surfaces
pub use files_connection_formats::{Format, FormatError, Frame, ReadOptions, ReadResult};
pub use files_connection_fs::{
    FileSystem, GcsConfig, GcsFs, HttpFs, LocalFs, MemoryFs, Protocol, S3Config, S3Fs,
};
