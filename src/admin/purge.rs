//! Dependency-ordered deletion of everything a tenant owns.
//!
//! The store enforces no referential integrity, so ordering is on us: edge
//! records and per-source derived records go first, then the primary
//! collections, then the secondary owned collections. Every step is a bulk
//! statement filtered by an owned-ID set or by owner directly. There is no
//! cross-step transaction; a failed call leaves earlier deletions in place,
//! and a retry re-derives the ID sets from current state and finishes the
//! remaining work. Deleting an already-empty set is a no-op, which is what
//! makes the retry safe.

use futures::try_join;
use serde::Deserialize;
use surrealdb::{RecordId, Surreal, engine::any::Any};
use tracing::{debug, info};

use super::models::AdminError;
use super::reaper::reap_episode_assets;
use crate::storage::AssetStore;

/// Primary collections, deleted by owner after their edges are gone.
const PRIMARY_OWNED: &[&str] = &["notebook", "note", "source"];

/// Collections owned directly with no graph edges into the primary set,
/// paired with the attribute that carries the owner reference. `episode`
/// goes last; its rows were already consumed by the asset reaper.
const SECONDARY_OWNED: &[(&str, &str)] = &[
    ("user_provider_secret", "user"),
    ("chat_session", "owner"),
    ("episode_profile", "owner"),
    ("speaker_profile", "owner"),
    ("episode", "owner"),
];

#[derive(Debug, Deserialize)]
struct IdRow {
    id: RecordId,
}

/// Delete all data owned by `owner`, never leaving dangling edges.
///
/// Fails with [`AdminError::NotFound`] when no such user exists. The user
/// row itself is never deleted. External audio assets are reaped first,
/// while their locators are still queryable.
pub async fn clear_owner_data(
    db: &Surreal<Any>,
    assets: Option<&AssetStore>,
    owner: &RecordId,
) -> Result<(), AdminError> {
    ensure_user_exists(db, owner).await?;

    let report = reap_episode_assets(db, assets, owner).await?;
    debug!(
        "reaped assets for {owner}: {} remote, {} local of {} episodes",
        report.remote_deleted, report.local_deleted, report.episodes
    );

    let notebook_ids = collect_ids(db, "notebook", owner).await?;
    let source_ids = collect_ids(db, "source", owner).await?;
    let note_ids = collect_ids(db, "note", owner).await?;

    if !source_ids.is_empty() {
        // The two derived-by-source collections are disjoint.
        try_join!(
            delete_where_in(db, "source_embedding", "source", &source_ids),
            delete_where_in(db, "source_insight", "source", &source_ids),
        )?;
        delete_where_in(db, "reference", "in", &source_ids).await?;
    }

    if !note_ids.is_empty() {
        delete_where_in(db, "artifact", "in", &note_ids).await?;
    }

    if !notebook_ids.is_empty() {
        delete_where_in(db, "reference", "out", &notebook_ids).await?;
        delete_where_in(db, "artifact", "out", &notebook_ids).await?;
    }

    for table in PRIMARY_OWNED {
        delete_by_owner(db, table, "owner", owner).await?;
    }
    for (table, field) in SECONDARY_OWNED {
        delete_by_owner(db, table, field, owner).await?;
    }

    info!("cleared all owned data for {owner}");
    Ok(())
}

pub(crate) async fn ensure_user_exists(
    db: &Surreal<Any>,
    owner: &RecordId,
) -> Result<(), AdminError> {
    let mut response = db
        .query("SELECT id FROM user WHERE id = $user_id")
        .bind(("user_id", owner.clone()))
        .await?;
    let rows: Vec<IdRow> = response.take(0)?;
    if rows.is_empty() {
        return Err(AdminError::NotFound(owner.to_string()));
    }
    Ok(())
}

async fn collect_ids(
    db: &Surreal<Any>,
    table: &str,
    owner: &RecordId,
) -> Result<Vec<RecordId>, AdminError> {
    let statement = format!("SELECT id FROM {table} WHERE owner = $owner");
    let mut response = db.query(statement).bind(("owner", owner.clone())).await?;
    let rows: Vec<IdRow> = response.take(0)?;
    Ok(rows.into_iter().map(|row| row.id).collect())
}

async fn delete_where_in(
    db: &Surreal<Any>,
    table: &str,
    field: &str,
    ids: &[RecordId],
) -> Result<(), AdminError> {
    let statement = format!("DELETE FROM {table} WHERE {field} IN $ids");
    db.query(statement)
        .bind(("ids", ids.to_vec()))
        .await?
        .check()?;
    debug!(
        "deleted {table} records with {field} in owned set ({} ids)",
        ids.len()
    );
    Ok(())
}

async fn delete_by_owner(
    db: &Surreal<Any>,
    table: &str,
    field: &str,
    owner: &RecordId,
) -> Result<(), AdminError> {
    let statement = format!("DELETE FROM {table} WHERE {field} = $owner");
    db.query(statement)
        .bind(("owner", owner.clone()))
        .await?
        .check()?;
    debug!("deleted {table} records owned by {owner}");
    Ok(())
}
