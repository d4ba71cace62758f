pub mod assets;
pub mod locator;

use thiserror::Error;

pub use assets::{AssetStore, build_episode_asset_key};
pub use locator::AudioLocator;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object storage is not configured")]
    NotConfigured,
    #[error("invalid asset locator: {0}")]
    InvalidLocator(String),
    #[error("object storage error: {0}")]
    Backend(#[from] object_store::Error),
}
