//! Storage locations (S3-compatible object storage or local filesystem)

use super::glob::GlobPattern;
use crate::config::Credentials;
use crate::error::{Error, Result};
use bytes::Bytes;
use futures::TryStreamExt;
use object_store::aws::AmazonS3Builder;
use object_store::local::LocalFileSystem;
use object_store::path::{Path as ObjectPath, PathPart};
use object_store::ObjectStore;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Everything needed to open an object storage location
#[derive(Debug, Clone)]
pub struct StorageOptions {
    /// Explicit credentials
    pub credentials: Credentials,
    /// Bucket region
    pub region: String,
    /// Optional S3-compatible endpoint
    pub endpoint: Option<String>,
}

/// A base location plus the object store serving it
#[derive(Debug, Clone)]
pub struct StorageLocation {
    /// The object store implementation
    store: Arc<dyn ObjectStore>,
    /// Base path prefix within the bucket (no leading/trailing slash)
    prefix: String,
    /// URL scheme (s3, file) for logging
    scheme: String,
    /// Bucket name or local root, for logging
    root: String,
}

impl StorageLocation {
    /// Open an input location; local roots must already exist
    ///
    /// Supported formats:
    /// - `s3://bucket/path/`, `s3a://bucket/path/`, `s3n://bucket/path/`
    /// - `/local/path/`, `./path/` or `file:///local/path/`
    pub fn input(url: &str, options: &StorageOptions) -> Result<Self> {
        Self::parse(url, options, false)
    }

    /// Open an output location; local roots are created when missing
    pub fn output(url: &str, options: &StorageOptions) -> Result<Self> {
        Self::parse(url, options, true)
    }

    fn parse(url: &str, options: &StorageOptions, create: bool) -> Result<Self> {
        let url = url.trim();
        if url.starts_with("s3://") || url.starts_with("s3a://") || url.starts_with("s3n://") {
            Self::parse_s3(url, options)
        } else {
            Self::parse_local(url, create)
        }
    }

    /// Parse an S3 URL; the Hadoop `s3a`/`s3n` schemes are accepted as aliases
    fn parse_s3(url: &str, options: &StorageOptions) -> Result<Self> {
        let parsed = Url::parse(url)
            .map_err(|e| Error::invalid_value("location", format!("{url}: {e}")))?;

        let bucket = parsed
            .host_str()
            .filter(|b| !b.is_empty())
            .ok_or_else(|| Error::invalid_value("location", format!("{url}: missing bucket")))?
            .to_string();
        let prefix = parsed.path().trim_matches('/').to_string();

        let mut builder = AmazonS3Builder::new()
            .with_bucket_name(&bucket)
            .with_region(&options.region)
            .with_access_key_id(&options.credentials.access_key_id)
            .with_secret_access_key(&options.credentials.secret_access_key);

        if let Some(endpoint) = &options.endpoint {
            builder = builder
                .with_endpoint(endpoint)
                .with_allow_http(endpoint.starts_with("http://"));
        }

        let store = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to create S3 client for {url}: {e}")))?;

        Ok(Self {
            store: Arc::new(store),
            prefix,
            scheme: "s3".to_string(),
            root: bucket,
        })
    }

    /// Parse local filesystem path
    fn parse_local(path: &str, create: bool) -> Result<Self> {
        let path = path.strip_prefix("file://").unwrap_or(path);

        if create {
            std::fs::create_dir_all(path)
                .map_err(|e| Error::config(format!("Failed to create directory {path}: {e}")))?;
        } else if !std::path::Path::new(path).is_dir() {
            return Err(Error::config(format!("Input location does not exist: {path}")));
        }

        let store = LocalFileSystem::new_with_prefix(path)
            .map_err(|e| Error::config(format!("Failed to create local store: {e}")))?;

        Ok(Self {
            store: Arc::new(store),
            prefix: String::new(),
            scheme: "file".to_string(),
            root: path.trim_end_matches('/').to_string(),
        })
    }

    /// Check if this is a cloud location (not local)
    pub fn is_cloud(&self) -> bool {
        self.scheme != "file"
    }

    /// Get the scheme (s3, file)
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Build an object path below the base prefix
    ///
    /// Each part becomes exactly one path segment; characters that are not
    /// valid inside a segment (including `/`) are percent-encoded.
    pub fn path<I, S>(&self, parts: I) -> ObjectPath
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut segments: Vec<String> = self
            .prefix
            .split('/')
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
            .collect();
        segments.extend(parts.into_iter().map(|p| p.as_ref().to_string()));
        ObjectPath::from_iter(segments.into_iter().map(PathPart::from))
    }

    /// Human-readable URL of an object, for logs
    pub fn display(&self, location: &ObjectPath) -> String {
        format!("{}://{}/{location}", self.scheme, self.root)
    }

    /// List the objects matching `pattern`, sorted by path
    ///
    /// Files whose name starts with `_` or `.` (markers, checksums) are skipped.
    /// No match is not an error.
    pub async fn list_matching(&self, pattern: &GlobPattern) -> Result<Vec<ObjectPath>> {
        let list_prefix = self.path(pattern.literal_prefix());
        let objects: Vec<_> = self.store.list(Some(&list_prefix)).try_collect().await?;

        let mut matched: Vec<ObjectPath> = objects
            .into_iter()
            .map(|meta| meta.location)
            .filter(|location| {
                let hidden = location
                    .filename()
                    .is_some_and(|name| name.starts_with('_') || name.starts_with('.'));
                !hidden && pattern.is_match(self.relative(location))
            })
            .collect();
        matched.sort();

        debug!(
            pattern = %pattern,
            matched = matched.len(),
            "Listed input objects"
        );
        Ok(matched)
    }

    /// Read a whole object
    pub async fn read(&self, location: &ObjectPath) -> Result<Bytes> {
        let data = self.store.get(location).await?.bytes().await?;
        Ok(data)
    }

    /// Write bytes to an object, replacing it if present
    pub async fn write(&self, location: &ObjectPath, data: Bytes) -> Result<String> {
        self.store.put(location, data.into()).await?;
        Ok(self.display(location))
    }

    /// Delete every object below `parts`, returning how many were removed
    pub async fn delete_prefix<I, S>(&self, parts: I) -> Result<usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let prefix = self.path(parts);
        let objects: Vec<_> = self.store.list(Some(&prefix)).try_collect().await?;

        for meta in &objects {
            self.store.delete(&meta.location).await?;
        }
        Ok(objects.len())
    }

    /// Path of an object relative to the base prefix
    fn relative<'a>(&self, location: &'a ObjectPath) -> &'a str {
        let full = location.as_ref();
        if self.prefix.is_empty() {
            return full;
        }
        full.strip_prefix(self.prefix.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
            .unwrap_or(full)
    }
}
