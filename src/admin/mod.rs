//! Administrative tenant operations: summaries, per-tenant detail and the
//! cascading clear of everything a tenant owns.

pub mod backfill;
pub mod models;
pub mod purge;
pub mod reader;
pub mod reaper;
pub mod service;

pub use backfill::{BackfillReport, assign_owner_to_unowned};
pub use models::{
    AdminError, EpisodeInfo, NotebookInfo, NoteInfo, SourceInfo, UserDetail, UserSummary,
};
pub use purge::clear_owner_data;
pub use reader::{get_user_detail, list_users};
pub use reaper::{ReapReport, reap_episode_assets};
pub use service::{AdminService, ensure_distinct_caller};
