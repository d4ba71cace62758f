//! Deletion of externally stored episode audio.
//!
//! Runs before the episode rows themselves are removed, so the locators are
//! still queryable. Object-storage failures abort the reaper and propagate;
//! local-filesystem failures are logged and skipped so a missing or locked
//! file can never block the metadata cascade.

use std::path::Path;

use serde::Deserialize;
use surrealdb::{RecordId, Surreal, engine::any::Any};
use tracing::{debug, warn};

use super::models::AdminError;
use crate::storage::{AssetStore, AudioLocator, StorageError};

#[derive(Debug, Deserialize)]
struct EpisodeAssetRow {
    id: RecordId,
    audio_file: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ReapReport {
    /// Episodes enumerated for the tenant.
    pub episodes: usize,
    /// Objects deleted from object storage.
    pub remote_deleted: usize,
    /// Files unlinked from the local filesystem.
    pub local_deleted: usize,
    /// Episodes with no locator or an unusable one.
    pub skipped: usize,
}

/// Delete the external audio bytes of every episode owned by `owner`.
pub async fn reap_episode_assets(
    db: &Surreal<Any>,
    assets: Option<&AssetStore>,
    owner: &RecordId,
) -> Result<ReapReport, AdminError> {
    let mut response = db
        .query("SELECT id, audio_file FROM episode WHERE owner = $owner")
        .bind(("owner", owner.clone()))
        .await?;
    let rows: Vec<EpisodeAssetRow> = response.take(0)?;

    let mut report = ReapReport {
        episodes: rows.len(),
        ..ReapReport::default()
    };

    for row in rows {
        let Some(raw) = row
            .audio_file
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        else {
            report.skipped += 1;
            continue;
        };

        match AudioLocator::parse(raw) {
            Ok(AudioLocator::Remote { bucket, key }) => {
                let store = assets.ok_or(StorageError::NotConfigured)?;
                if store.bucket() != bucket {
                    // The configured bucket wins; locators written under an
                    // earlier bucket name still carry the old one.
                    debug!(
                        "episode {} locator names bucket {bucket}, configured bucket is {}",
                        row.id,
                        store.bucket()
                    );
                }
                store.delete_object(&key).await.map_err(AdminError::Storage)?;
                report.remote_deleted += 1;
            }
            Ok(AudioLocator::Local(path)) => {
                if remove_local_file(&path).await {
                    report.local_deleted += 1;
                }
            }
            Err(e) => {
                warn!("episode {} has an unusable audio locator: {e}", row.id);
                report.skipped += 1;
            }
        }
    }

    Ok(report)
}

/// Unlink a local audio file, then try to drop its parent directory if that
/// leaves it empty. Neither failure is fatal.
async fn remove_local_file(path: &Path) -> bool {
    let mut removed = false;
    if tokio::fs::try_exists(path).await.unwrap_or(false) {
        match tokio::fs::remove_file(path).await {
            Ok(()) => {
                debug!("deleted local audio file {}", path.display());
                removed = true;
            }
            Err(e) => {
                warn!("failed to delete local audio file {}: {e}", path.display());
            }
        }
    }

    if let Some(parent) = path.parent() {
        if tokio::fs::try_exists(parent).await.unwrap_or(false) {
            // Fails when the directory still has entries; that is fine.
            let _ = tokio::fs::remove_dir(parent).await;
        }
    }

    removed
}
