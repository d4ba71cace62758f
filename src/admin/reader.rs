//! Read-only tenant summaries and per-tenant listings.
//!
//! The four per-collection aggregates are independent queries over disjoint
//! data, so each group of four is fetched concurrently; their completion
//! order does not matter.

use chrono::{DateTime, Utc};
use futures::try_join;
use serde::Deserialize;
use surrealdb::{RecordId, Surreal, engine::any::Any};
use surrealdb::sql::Datetime;

use super::models::{
    AdminError, EpisodeInfo, NotebookInfo, NoteInfo, SourceInfo, UserDetail, UserSummary,
};

#[derive(Debug, Deserialize)]
struct UserRow {
    id: RecordId,
    email: Option<String>,
    display_name: Option<String>,
    is_active: Option<bool>,
    is_admin: Option<bool>,
    created: Option<Datetime>,
    updated: Option<Datetime>,
}

#[derive(Debug, Deserialize)]
struct CountRow {
    count: i64,
}

#[derive(Debug, Deserialize)]
struct NamedRow {
    id: RecordId,
    name: Option<String>,
    created: Option<Datetime>,
    updated: Option<Datetime>,
}

#[derive(Debug, Deserialize)]
struct TitledRow {
    id: RecordId,
    title: Option<String>,
    created: Option<Datetime>,
    updated: Option<Datetime>,
}

/// One summary row per user, in creation order.
pub async fn list_users(db: &Surreal<Any>) -> Result<Vec<UserSummary>, AdminError> {
    let mut response = db
        .query(
            "SELECT id, email, display_name, is_active, is_admin, created, updated \
             FROM user ORDER BY created",
        )
        .await?;
    let users: Vec<UserRow> = response.take(0)?;

    let mut summaries = Vec::with_capacity(users.len());
    for user in users {
        let owner = user.id.clone();
        let (notebook_count, source_count, note_count, episode_count) = try_join!(
            count_records(db, "notebook", &owner),
            count_records(db, "source", &owner),
            count_records(db, "note", &owner),
            count_records(db, "episode", &owner),
        )?;
        summaries.push(summary_from_row(
            user,
            notebook_count,
            source_count,
            note_count,
            episode_count,
        ));
    }
    Ok(summaries)
}

/// Summary plus full per-collection listings for one tenant.
pub async fn get_user_detail(
    db: &Surreal<Any>,
    owner: &RecordId,
) -> Result<UserDetail, AdminError> {
    let mut response = db
        .query(
            "SELECT id, email, display_name, is_active, is_admin, created, updated \
             FROM user WHERE id = $user_id",
        )
        .bind(("user_id", owner.clone()))
        .await?;
    let mut rows: Vec<UserRow> = response.take(0)?;
    let Some(user) = rows.pop() else {
        return Err(AdminError::NotFound(owner.to_string()));
    };

    let (notebooks, sources, notes, episodes) = try_join!(
        fetch_named(db, "notebook", owner),
        fetch_titled(db, "source", owner),
        fetch_titled(db, "note", owner),
        fetch_named(db, "episode", owner),
    )?;

    let summary =
        summary_from_row(user, notebooks.len(), sources.len(), notes.len(), episodes.len());

    Ok(UserDetail {
        summary,
        notebooks: notebooks
            .into_iter()
            .map(|row| NotebookInfo {
                id: row.id.to_string(),
                name: row.name.unwrap_or_default(),
                created: format_time(row.created),
                updated: format_time(row.updated),
            })
            .collect(),
        sources: sources
            .into_iter()
            .map(|row| SourceInfo {
                id: row.id.to_string(),
                title: row.title,
                created: format_time(row.created),
                updated: format_time(row.updated),
            })
            .collect(),
        notes: notes
            .into_iter()
            .map(|row| NoteInfo {
                id: row.id.to_string(),
                title: row.title,
                created: format_time(row.created),
                updated: format_time(row.updated),
            })
            .collect(),
        episodes: episodes
            .into_iter()
            .map(|row| EpisodeInfo {
                id: row.id.to_string(),
                name: row.name.unwrap_or_default(),
                created: format_time(row.created),
                updated: format_time(row.updated),
            })
            .collect(),
    })
}

pub(crate) async fn count_records(
    db: &Surreal<Any>,
    table: &str,
    owner: &RecordId,
) -> Result<usize, AdminError> {
    let statement = format!("SELECT count() AS count FROM {table} WHERE owner = $owner GROUP ALL");
    let mut response = db.query(statement).bind(("owner", owner.clone())).await?;
    let rows: Vec<CountRow> = response.take(0)?;
    Ok(rows.first().map(|row| row.count.max(0) as usize).unwrap_or(0))
}

async fn fetch_named(
    db: &Surreal<Any>,
    table: &str,
    owner: &RecordId,
) -> Result<Vec<NamedRow>, AdminError> {
    let statement = format!("SELECT id, name, created, updated FROM {table} WHERE owner = $owner");
    let mut response = db.query(statement).bind(("owner", owner.clone())).await?;
    Ok(response.take(0)?)
}

async fn fetch_titled(
    db: &Surreal<Any>,
    table: &str,
    owner: &RecordId,
) -> Result<Vec<TitledRow>, AdminError> {
    let statement = format!("SELECT id, title, created, updated FROM {table} WHERE owner = $owner");
    let mut response = db.query(statement).bind(("owner", owner.clone())).await?;
    Ok(response.take(0)?)
}

fn summary_from_row(
    user: UserRow,
    notebook_count: usize,
    source_count: usize,
    note_count: usize,
    episode_count: usize,
) -> UserSummary {
    UserSummary {
        id: user.id.to_string(),
        email: user.email.unwrap_or_default(),
        display_name: user.display_name,
        is_active: user.is_active.unwrap_or(true),
        is_admin: user.is_admin.unwrap_or(false),
        created: format_time(user.created),
        updated: format_time(user.updated),
        notebook_count,
        source_count,
        note_count,
        episode_count,
    }
}

fn format_time(value: Option<Datetime>) -> Option<String> {
    value.map(|dt| DateTime::<Utc>::from(dt).to_rfc3339())
}
