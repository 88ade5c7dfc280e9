//! Connection secrets loading.
//!
//! Secrets live in a TOML file with one table per connection:
//!
//! ```toml
//! [connections.my_data]
//! protocol = "s3"
//! key = "AKIA..."
//! secret = "..."
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Environment variable naming the secrets file path.
pub const SECRETS_PATH_ENV: &str = "FILES_CONNECTION_SECRETS";

/// Default secrets file location.
pub const DEFAULT_SECRETS_PATH: &str = "secrets.toml";

/// Credential/configuration map for one connection.
pub type Secrets = serde_json::Map<String, serde_json::Value>;

/// All connection secrets from a secrets file.
#[derive(Debug, Default, Deserialize)]
pub struct SecretsStore {
    #[serde(default)]
    connections: HashMap<String, Secrets>,
}

impl SecretsStore {
    /// Load secrets from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read secrets file: {}", path.display()))?;
        Self::parse(&text)
            .with_context(|| format!("Failed to parse secrets file: {}", path.display()))
    }

    /// Parse secrets from TOML text.
    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load secrets from the path named by `FILES_CONNECTION_SECRETS`,
    /// falling back to `./secrets.toml`.
    ///
    /// A missing fallback file yields an empty store; a missing file named
    /// by the environment variable is an error.
    pub fn load_default() -> Result<Self> {
        if let Ok(path) = std::env::var(SECRETS_PATH_ENV) {
            return Self::load(&path);
        }
        if Path::new(DEFAULT_SECRETS_PATH).exists() {
            return Self::load(DEFAULT_SECRETS_PATH);
        }
        Ok(Self::default())
    }

    /// Secrets for a named connection; empty when the name is absent.
    pub fn connection(&self, name: &str) -> Secrets {
        self.connections.get(name).cloned().unwrap_or_default()
    }

    /// Whether the store has a table for `name`.
    pub fn has_connection(&self, name: &str) -> bool {
        self.connections.contains_key(name)
    }
}
