//! AWS S3 backend with prefix listing support

use anyhow::{Context, Result};
use aws_config::BehaviorVersion;

/// Credential and endpoint overrides resolved from connection secrets.
///
/// Fields left as `None` fall back to the ambient AWS configuration
/// (environment, profile, instance metadata).
#[derive(Debug, Clone, Default)]
pub struct S3Config {
    pub region: Option<String>,
    pub endpoint_url: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub session_token: Option<String>,
}

/// Reads objects from AWS S3.
///
/// Creating an S3 client is relatively expensive, so the client is built
/// once per connection and reused across operations.
#[derive(Debug, Clone)]
pub struct S3Fs {
    client: aws_sdk_s3::Client,
}

impl S3Fs {
    /// Build an S3 client from the ambient AWS config plus `config` overrides.
    pub async fn connect(config: S3Config) -> Result<Self> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(region) = config.region {
            loader = loader.region(aws_config::Region::new(region));
        }

        if let (Some(key), Some(secret)) = (config.access_key_id, config.secret_access_key) {
            loader = loader.credentials_provider(aws_sdk_s3::config::Credentials::new(
                key,
                secret,
                config.session_token,
                None,
                "files-connection",
            ));
        }

        let sdk_config = loader.load().await;
        let mut builder = aws_sdk_s3::config::Builder::from(&sdk_config);

        if let Some(endpoint) = config.endpoint_url {
            // Path-style addressing for S3-compatible stores (MinIO etc.)
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        let client = aws_sdk_s3::Client::from_conf(builder.build());
        Ok(Self { client })
    }

    /// Open an S3 object and return an in-memory reader.
    ///
    /// Accepts `s3://bucket/key` URIs and bare `bucket/key` paths.
    pub async fn open(&self, path: &str) -> Result<Box<dyn std::io::Read + Send>> {
        let (bucket, key) = parse_s3_path(path)?;

        let response = self
            .client
            .get_object()
            .bucket(&bucket)
            .key(&key)
            .send()
            .await
            .with_context(|| format!("Failed to fetch object from S3: s3://{bucket}/{key}"))?;

        let bytes = response
            .body
            .collect()
            .await
            .with_context(|| format!("Failed to read object body: s3://{bucket}/{key}"))?
            .into_bytes();

        tracing::debug!("Fetched {} bytes from: s3://{bucket}/{key}", bytes.len());

        Ok(Box::new(std::io::Cursor::new(bytes)))
    }

    /// List all objects under a prefix (non-recursive, immediate level only).
    ///
    /// Note: S3 doesn't have true directories, so this lists with a `/`
    /// delimiter and skips "subdirectory" marker keys.
    pub async fn list(&self, path: &str) -> Result<Vec<String>> {
        let (bucket, prefix) = parse_s3_path(path)?;
        let mut results = Vec::new();
        let mut continuation_token: Option<String> = None;

        loop {
            let mut request = self
                .client
                .list_objects_v2()
                .bucket(&bucket)
                .prefix(&prefix)
                .delimiter("/");

            if let Some(token) = &continuation_token {
                request = request.continuation_token(token);
            }

            let response = request
                .send()
                .await
                .with_context(|| format!("Failed to list S3 prefix: s3://{bucket}/{prefix}"))?;

            if let Some(contents) = response.contents {
                for object in contents {
                    if let Some(key) = object.key {
                        // Skip the prefix itself and "directory" markers
                        if key == prefix || key.ends_with('/') {
                            continue;
                        }
                        results.push(format!("{bucket}/{key}"));
                    }
                }
            }

            if response.is_truncated == Some(true) {
                continuation_token = response.next_continuation_token;
            } else {
                break;
            }
        }

        results.sort();

        tracing::debug!(
            "Listed {} objects in S3 prefix: s3://{bucket}/{prefix}",
            results.len()
        );

        Ok(results)
    }
}

/// Split an S3 path into bucket and key.
///
/// Accepts `s3://bucket/key/to/file` and `bucket/key/to/file`.
pub fn parse_s3_path(path: &str) -> Result<(String, String)> {
    let path = path
        .strip_prefix("s3://")
        .or_else(|| path.strip_prefix("s3a://"))
        .unwrap_or(path);

    match path.split_once('/') {
        Some((bucket, key)) if !bucket.is_empty() => Ok((bucket.to_string(), key.to_string())),
        _ => anyhow::bail!("S3 path must be in format 'bucket/key/to/file': {path}"),
    }
}
