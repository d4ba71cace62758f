use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::ident::IdentError;
use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum AdminError {
    #[error("user not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    InvalidIdentifier(#[from] IdentError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("database error: {0}")]
    Database(String),
    #[error("administrators cannot clear their own data")]
    SelfTarget,
}

impl From<surrealdb::Error> for AdminError {
    fn from(e: surrealdb::Error) -> Self {
        AdminError::Database(e.to_string())
    }
}

/// One row of the tenant listing: identity plus per-collection counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: String,
    pub email: String,
    pub display_name: Option<String>,
    pub is_active: bool,
    pub is_admin: bool,
    pub created: Option<String>,
    pub updated: Option<String>,
    pub notebook_count: usize,
    pub source_count: usize,
    pub note_count: usize,
    pub episode_count: usize,
}

/// Tenant summary plus the full listing of each owned collection.
/// The summary counts always equal the listing lengths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDetail {
    #[serde(flatten)]
    pub summary: UserSummary,
    pub notebooks: Vec<NotebookInfo>,
    pub sources: Vec<SourceInfo>,
    pub notes: Vec<NoteInfo>,
    pub episodes: Vec<EpisodeInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotebookInfo {
    pub id: String,
    pub name: String,
    pub created: Option<String>,
    pub updated: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceInfo {
    pub id: String,
    pub title: Option<String>,
    pub created: Option<String>,
    pub updated: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteInfo {
    pub id: String,
    pub title: Option<String>,
    pub created: Option<String>,
    pub updated: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeInfo {
    pub id: String,
    pub name: String,
    pub created: Option<String>,
    pub updated: Option<String>,
}
