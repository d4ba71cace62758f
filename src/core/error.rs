use thiserror::Error;

use crate::admin::AdminError;
use crate::db::client::RepoClientError;
use crate::storage::StorageError;

/// Crate-level error, used where several subsystems meet (wiring, binaries).
/// The admin and storage layers keep their own narrower enums.
#[derive(Error, Debug)]
pub enum LorebookError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Admin(#[from] AdminError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Client(#[from] RepoClientError),

    #[error("database error: {0}")]
    Database(#[from] surrealdb::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LorebookError>;
