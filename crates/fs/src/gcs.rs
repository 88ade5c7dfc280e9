//! Google Cloud Storage backend
//!
//! A thin adapter over the GCS HTTP endpoints: object downloads go through
//! the direct media endpoint, listing through the JSON API. Authentication
//! is a pre-issued OAuth bearer token supplied in the connection secrets;
//! without a token, requests are anonymous (public buckets).

use anyhow::{Context, Result};
use serde::Deserialize;

const STORAGE_ENDPOINT: &str = "https://storage.googleapis.com";

/// GCS settings resolved from connection secrets.
#[derive(Debug, Clone, Default)]
pub struct GcsConfig {
    /// OAuth bearer token. `None` sends anonymous requests.
    pub token: Option<String>,
}

/// Reads objects from Google Cloud Storage.
#[derive(Debug, Clone)]
pub struct GcsFs {
    client: reqwest::Client,
    token: Option<String>,
}

/// JSON API object listing response (the fields we consume).
#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    items: Vec<ListedObject>,
    #[serde(rename = "nextPageToken")]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListedObject {
    name: String,
}

impl GcsFs {
    pub fn new(config: GcsConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            token: config.token,
        }
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        let mut request = self.client.get(url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        request
    }

    /// Fetch an object and return it as an in-memory reader.
    ///
    /// Accepts `gs://bucket/object` URIs and bare `bucket/object` paths.
    pub async fn open(&self, path: &str) -> Result<Box<dyn std::io::Read + Send>> {
        let (bucket, object) = parse_gcs_path(path)?;
        let url = format!("{STORAGE_ENDPOINT}/{bucket}/{object}");

        let response = self
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch object from GCS: gs://{bucket}/{object}"))?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("GCS request failed with status {status} for gs://{bucket}/{object}");
        }

        let bytes = response
            .bytes()
            .await
            .with_context(|| format!("Failed to read object body: gs://{bucket}/{object}"))?;

        tracing::debug!("Fetched {} bytes from: gs://{bucket}/{object}", bytes.len());

        Ok(Box::new(std::io::Cursor::new(bytes)))
    }

    /// List all objects under a prefix (non-recursive, immediate level only).
    pub async fn list(&self, path: &str) -> Result<Vec<String>> {
        let (bucket, prefix) = parse_gcs_path(path)?;
        let url = format!("{STORAGE_ENDPOINT}/storage/v1/b/{bucket}/o");
        let mut results = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut query = vec![("prefix", prefix.clone()), ("delimiter", "/".to_string())];
            if let Some(token) = &page_token {
                query.push(("pageToken", token.clone()));
            }

            let response = self
                .get(&url)
                .query(&query)
                .send()
                .await
                .with_context(|| format!("Failed to list GCS prefix: gs://{bucket}/{prefix}"))?;

            let status = response.status();
            if !status.is_success() {
                anyhow::bail!("GCS listing failed with status {status} for gs://{bucket}/{prefix}");
            }

            let body = response
                .bytes()
                .await
                .with_context(|| format!("Failed to read GCS listing: gs://{bucket}/{prefix}"))?;
            let page: ListResponse = serde_json::from_slice(&body)
                .with_context(|| format!("Failed to decode GCS listing: gs://{bucket}/{prefix}"))?;

            for object in page.items {
                // Skip the prefix itself and "directory" markers
                if object.name == prefix || object.name.ends_with('/') {
                    continue;
                }
                results.push(format!("{bucket}/{}", object.name));
            }

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        results.sort();

        tracing::debug!(
            "Listed {} objects in GCS prefix: gs://{bucket}/{prefix}",
            results.len()
        );

        Ok(results)
    }
}

/// Split a GCS path into bucket and object name.
pub fn parse_gcs_path(path: &str) -> Result<(String, String)> {
    let path = path
        .strip_prefix("gs://")
        .or_else(|| path.strip_prefix("gcs://"))
        .unwrap_or(path);

    match path.split_once('/') {
        Some((bucket, object)) if !bucket.is_empty() => {
            Ok((bucket.to_string(), object.to_string()))
        }
        _ => anyhow::bail!("GCS path must be in format 'bucket/path/to/object': {path}"),
    }
}
