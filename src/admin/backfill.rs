//! Owner backfill for legacy records created before ownership existed.
//!
//! `owner` on a primary entity is immutable once set; the only permitted
//! transition is unset to set, which is exactly what these bulk updates do.
//! Rows that already carry an owner are never touched.

use serde::{Deserialize, Serialize};
use surrealdb::{RecordId, Surreal, engine::any::Any};
use tracing::info;

use super::models::AdminError;
use super::purge::ensure_user_exists;

#[derive(Debug, Deserialize)]
struct IdRow {
    #[allow(dead_code)]
    id: RecordId,
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct BackfillReport {
    pub notebooks: usize,
    pub notes: usize,
    pub sources: usize,
}

impl BackfillReport {
    pub fn total(&self) -> usize {
        self.notebooks + self.notes + self.sources
    }
}

/// Assign every unowned notebook, note and source to `owner`.
pub async fn assign_owner_to_unowned(
    db: &Surreal<Any>,
    owner: &RecordId,
) -> Result<BackfillReport, AdminError> {
    ensure_user_exists(db, owner).await?;

    let report = BackfillReport {
        notebooks: claim_unowned(db, "notebook", owner).await?,
        notes: claim_unowned(db, "note", owner).await?,
        sources: claim_unowned(db, "source", owner).await?,
    };

    if report.total() > 0 {
        info!("assigned {} legacy records to {owner}", report.total());
    }
    Ok(report)
}

async fn claim_unowned(
    db: &Surreal<Any>,
    table: &str,
    owner: &RecordId,
) -> Result<usize, AdminError> {
    let statement =
        format!("UPDATE {table} SET owner = $owner WHERE owner IS NONE OR owner IS NULL");
    let mut response = db.query(statement).bind(("owner", owner.clone())).await?;
    let rows: Vec<IdRow> = response.take(0)?;
    Ok(rows.len())
}
