use std::sync::Arc;

use object_store::aws::AmazonS3Builder;
use object_store::memory::InMemory;
use object_store::path::Path as ObjectPath;
use object_store::{ObjectStore, PutPayload};
use tracing::{debug, info};

use super::StorageError;
use crate::core::config::LorebookConfig;

/// Object storage for episode audio, keyed under a single bucket.
///
/// Production uses an S3-compatible backend; tests use the in-memory one.
/// Deletes are idempotent: removing a key that is already gone succeeds,
/// matching S3 semantics, which keeps retried cascades safe.
#[derive(Clone)]
pub struct AssetStore {
    store: Arc<dyn ObjectStore>,
    bucket: String,
}

impl AssetStore {
    /// Build from configuration. Returns `None` when no bucket is configured,
    /// in which case only local audio files are expected.
    pub fn from_config(config: &LorebookConfig) -> Result<Option<Self>, StorageError> {
        let Some(bucket) = config.s3_bucket.as_deref().filter(|b| !b.is_empty()) else {
            return Ok(None);
        };

        let mut builder = AmazonS3Builder::from_env()
            .with_bucket_name(bucket)
            .with_region(config.s3_region.as_str());
        if let Some(endpoint) = &config.s3_endpoint {
            // S3-compatible endpoints (MinIO etc.) are usually plain HTTP.
            builder = builder.with_endpoint(endpoint.as_str()).with_allow_http(true);
        }

        let store = builder.build()?;
        info!("object storage configured for bucket {bucket}");
        Ok(Some(Self {
            store: Arc::new(store),
            bucket: bucket.to_string(),
        }))
    }

    /// In-memory store, for tests and local experiments.
    pub fn in_memory(bucket: &str) -> Self {
        Self {
            store: Arc::new(InMemory::new()),
            bucket: bucket.to_string(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub async fn delete_object(&self, key: &str) -> Result<(), StorageError> {
        let path = parse_key(key)?;
        match self.store.delete(&path).await {
            Ok(()) => {
                debug!("deleted object {key} from bucket {}", self.bucket);
                Ok(())
            }
            Err(object_store::Error::NotFound { .. }) => {
                debug!("object {key} already absent from bucket {}", self.bucket);
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn upload_object(&self, key: &str, bytes: Vec<u8>) -> Result<(), StorageError> {
        let path = parse_key(key)?;
        self.store.put(&path, PutPayload::from(bytes)).await?;
        Ok(())
    }

    pub async fn object_exists(&self, key: &str) -> Result<bool, StorageError> {
        let path = parse_key(key)?;
        match self.store.head(&path).await {
            Ok(_) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

fn parse_key(key: &str) -> Result<ObjectPath, StorageError> {
    ObjectPath::parse(key).map_err(|e| StorageError::InvalidLocator(format!("{key}: {e}")))
}

/// Canonical object key for an episode's audio file:
/// `episodes/{user_key}/{episode_key}/{filename}`. Record-id table prefixes
/// are stripped and characters S3 consoles choke on are replaced.
pub fn build_episode_asset_key(user_id: &str, episode_id: &str, filename: &str) -> String {
    let user_key = strip_table_prefix(user_id);
    let episode_key = strip_table_prefix(episode_id);
    let safe_filename = filename.replace([':', ' '], "_");
    format!("episodes/{user_key}/{episode_key}/{safe_filename}")
}

fn strip_table_prefix(id: &str) -> &str {
    id.rsplit(':').next().unwrap_or(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_key_strips_record_prefixes() {
        let key = build_episode_asset_key("user:u1", "episode:e1", "out.mp3");
        assert_eq!(key, "episodes/u1/e1/out.mp3");
    }

    #[test]
    fn asset_key_sanitizes_filename() {
        let key = build_episode_asset_key("u1", "e1", "My Show: Part 1.mp3");
        assert_eq!(key, "episodes/u1/e1/My_Show__Part_1.mp3");
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = AssetStore::in_memory("bucket");
        store
            .upload_object("episodes/u1/e1/out.mp3", b"audio".to_vec())
            .await
            .unwrap();

        store.delete_object("episodes/u1/e1/out.mp3").await.unwrap();
        assert!(!store.object_exists("episodes/u1/e1/out.mp3").await.unwrap());

        // Second delete of the same key is a no-op, not an error.
        store.delete_object("episodes/u1/e1/out.mp3").await.unwrap();
    }
}
