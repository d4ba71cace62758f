pub mod client;
pub mod ident;

pub use client::{RepoClient, RepoClientError};
pub use ident::{IdentError, ensure_user_ref, parse_record_ref};
