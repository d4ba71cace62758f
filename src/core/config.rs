use serde::{Deserialize, Serialize};

use crate::{DEFAULT_DATABASE, DEFAULT_DATA_FOLDER, DEFAULT_DB_URL, DEFAULT_NAMESPACE};

/// Runtime configuration for the backend.
///
/// Everything is environment-driven; `from_env` falls back to local-dev
/// defaults so the crate works out of the box against a local store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LorebookConfig {
    pub db_url: String,
    pub db_namespace: String,
    pub db_database: String,
    pub db_username: Option<String>,
    pub db_password: Option<String>,

    /// Root folder for locally stored uploads and episode audio.
    pub data_folder: String,

    /// Object-storage bucket for episode audio. `None` means object storage
    /// is not configured and only local audio files are expected.
    pub s3_bucket: Option<String>,
    pub s3_region: String,
    pub s3_endpoint: Option<String>,
}

impl LorebookConfig {
    pub fn new(db_url: &str) -> Self {
        Self {
            db_url: db_url.to_string(),
            db_namespace: DEFAULT_NAMESPACE.to_string(),
            db_database: DEFAULT_DATABASE.to_string(),
            db_username: None,
            db_password: None,
            data_folder: DEFAULT_DATA_FOLDER.to_string(),
            s3_bucket: None,
            s3_region: "us-east-1".to_string(),
            s3_endpoint: None,
        }
    }

    /// Configuration backed by the embedded in-memory engine. Used by tests
    /// and throwaway local runs; nothing survives the process.
    pub fn in_memory() -> Self {
        Self::new("mem://")
    }

    pub fn from_env() -> Self {
        let mut config = Self::new(
            &std::env::var("LOREBOOK_DB_URL").unwrap_or_else(|_| DEFAULT_DB_URL.to_string()),
        );

        if let Ok(ns) = std::env::var("LOREBOOK_DB_NAMESPACE") {
            config.db_namespace = ns;
        }
        if let Ok(db) = std::env::var("LOREBOOK_DB_DATABASE") {
            config.db_database = db;
        }
        if let Ok(user) = std::env::var("LOREBOOK_DB_USERNAME") {
            config.db_username = Some(user);
        }
        if let Ok(pass) = std::env::var("LOREBOOK_DB_PASSWORD") {
            config.db_password = Some(pass);
        }
        if let Ok(path) = std::env::var("DATA_PATH") {
            config.data_folder = path;
        }
        if let Ok(bucket) = std::env::var("S3_BUCKET_NAME") {
            if !bucket.is_empty() {
                config.s3_bucket = Some(bucket);
            }
        }
        if let Ok(region) = std::env::var("S3_REGION") {
            config.s3_region = region;
        }
        if let Ok(endpoint) = std::env::var("S3_ENDPOINT_URL") {
            if !endpoint.is_empty() {
                config.s3_endpoint = Some(endpoint);
            }
        }

        config
    }
}

impl Default for LorebookConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DB_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_store() {
        let config = LorebookConfig::default();
        assert_eq!(config.db_url, DEFAULT_DB_URL);
        assert_eq!(config.db_namespace, DEFAULT_NAMESPACE);
        assert!(config.s3_bucket.is_none());
    }

    #[test]
    fn in_memory_uses_mem_engine() {
        assert_eq!(LorebookConfig::in_memory().db_url, "mem://");
    }
}
