//! Canonical record references.
//!
//! Tenant identifiers arrive from the outside as opaque strings: either a
//! bare key (`"m2xk4..."`) or an already-canonical reference (`"user:m2xk4..."`,
//! possibly with the store's `⟨…⟩` key escaping). Both forms normalize to the
//! same [`RecordId`], so the conversion is idempotent and usable as a query
//! binding across every collection.

use surrealdb::RecordId;
use thiserror::Error;

pub const USER_TABLE: &str = "user";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentError {
    #[error("invalid record identifier: {0:?}")]
    InvalidIdentifier(String),
}

/// Parse a raw or canonical identifier into a record reference, using
/// `default_table` when the input carries no table prefix. No side effects.
pub fn parse_record_ref(raw: &str, default_table: &str) -> Result<RecordId, IdentError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(IdentError::InvalidIdentifier(raw.to_string()));
    }

    match trimmed.split_once(':') {
        Some((table, key)) => {
            let key = key.trim_matches(|c| c == '⟨' || c == '⟩' || c == '`');
            if table.is_empty() || key.is_empty() || !is_plain_ident(table) {
                return Err(IdentError::InvalidIdentifier(raw.to_string()));
            }
            Ok(RecordId::from_table_key(table, key))
        }
        None => Ok(RecordId::from_table_key(default_table, trimmed)),
    }
}

/// Resolve a tenant identifier to a canonical `user` reference.
pub fn ensure_user_ref(raw: &str) -> Result<RecordId, IdentError> {
    parse_record_ref(raw, USER_TABLE)
}

fn is_plain_ident(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_key_gets_user_table() {
        let id = ensure_user_ref("abc123").unwrap();
        assert_eq!(id.to_string(), "user:abc123");
    }

    #[test]
    fn canonical_form_is_idempotent() {
        let first = ensure_user_ref("user:abc123").unwrap();
        let second = ensure_user_ref(&first.to_string()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn escaped_keys_are_unwrapped() {
        let id = ensure_user_ref("user:⟨abc123⟩").unwrap();
        assert_eq!(id, RecordId::from_table_key("user", "abc123"));
    }

    #[test]
    fn whitespace_is_trimmed() {
        let id = ensure_user_ref("  user:abc123  ").unwrap();
        assert_eq!(id, RecordId::from_table_key("user", "abc123"));
    }

    #[test]
    fn other_tables_keep_their_prefix() {
        let id = parse_record_ref("notebook:n1", USER_TABLE).unwrap();
        assert_eq!(id, RecordId::from_table_key("notebook", "n1"));
    }

    #[test]
    fn malformed_input_is_rejected() {
        for raw in ["", "   ", "user:", ":abc", "us er:abc", "a-b:abc"] {
            assert!(ensure_user_ref(raw).is_err(), "accepted {raw:?}");
        }
    }
}
