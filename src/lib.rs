//! Lorebook - multi-tenant knowledge workspace backend.
//!
//! Each user owns a set of entities (notebooks, sources, notes, generated
//! audio episodes) linked by relation records in a shared SurrealDB store.
//! This crate implements the tenant data lifecycle engine: enumerating
//! everything a user owns across the collection graph and destroying it
//! consistently, including externally stored audio assets, while tolerating
//! partial failures without corrupting the remaining data.
//!
//! HTTP routing, authentication and single-entity CRUD live in the service
//! layer above this crate and are not part of it.

pub mod admin;
pub mod core;
pub mod db;
pub mod provider;
pub mod storage;

pub use admin::{AdminService, UserDetail, UserSummary};
pub use core::config::LorebookConfig;
pub use core::error::{LorebookError, Result};
pub use db::client::RepoClient;
pub use db::ident::{ensure_user_ref, parse_record_ref};
pub use storage::{AssetStore, AudioLocator, StorageError};

pub const DEFAULT_DB_URL: &str = "ws://localhost:8000";

pub const DEFAULT_NAMESPACE: &str = "lorebook";

pub const DEFAULT_DATABASE: &str = "main";

pub const DEFAULT_DATA_FOLDER: &str = "./data";
