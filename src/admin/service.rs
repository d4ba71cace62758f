use std::sync::Arc;

use surrealdb::RecordId;
use tracing::info;

use super::backfill::{BackfillReport, assign_owner_to_unowned};
use super::models::{AdminError, UserDetail, UserSummary};
use super::purge::clear_owner_data;
use super::reader;
use crate::db::client::RepoClient;
use crate::db::ident::ensure_user_ref;
use crate::storage::AssetStore;

/// Façade for administrative tenant operations: list tenants, inspect one,
/// clear one tenant's data, backfill legacy ownership.
///
/// Authorization is the caller's job. In particular, an admin clearing their
/// own tenant must be rejected before `clear_user_data` is invoked; use
/// [`ensure_distinct_caller`] for that check.
pub struct AdminService {
    client: Arc<RepoClient>,
    assets: Option<AssetStore>,
}

impl AdminService {
    pub fn new(client: Arc<RepoClient>, assets: Option<AssetStore>) -> Self {
        info!(
            "initializing admin service (object storage configured: {})",
            assets.is_some()
        );
        Self { client, assets }
    }

    pub async fn list_users(&self) -> Result<Vec<UserSummary>, AdminError> {
        reader::list_users(self.client.db()).await
    }

    pub async fn get_user_detail(&self, user_id: &str) -> Result<UserDetail, AdminError> {
        let owner = ensure_user_ref(user_id)?;
        reader::get_user_detail(self.client.db(), &owner).await
    }

    /// Delete all data owned by the tenant, including external audio assets.
    /// The user row itself survives. Partially-failed calls may be retried;
    /// see [`clear_owner_data`] for the exact semantics.
    pub async fn clear_user_data(&self, user_id: &str) -> Result<(), AdminError> {
        let owner = ensure_user_ref(user_id)?;
        clear_owner_data(self.client.db(), self.assets.as_ref(), &owner).await
    }

    /// Assign legacy unowned notebooks, notes and sources to the tenant.
    pub async fn assign_orphaned_data(&self, user_id: &str) -> Result<BackfillReport, AdminError> {
        let owner = ensure_user_ref(user_id)?;
        assign_owner_to_unowned(self.client.db(), &owner).await
    }
}

/// Self-protection precondition for the clear operation: the calling admin
/// must not be the tenant being cleared.
pub fn ensure_distinct_caller(caller: &RecordId, target: &RecordId) -> Result<(), AdminError> {
    if caller == target {
        return Err(AdminError::SelfTarget);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::ident::ensure_user_ref;

    #[test]
    fn clearing_own_tenant_is_rejected() {
        let caller = ensure_user_ref("user:admin").unwrap();
        let target = ensure_user_ref("admin").unwrap();
        assert!(matches!(
            ensure_distinct_caller(&caller, &target),
            Err(AdminError::SelfTarget)
        ));
    }

    #[test]
    fn clearing_another_tenant_is_allowed() {
        let caller = ensure_user_ref("user:admin").unwrap();
        let target = ensure_user_ref("user:member").unwrap();
        assert!(ensure_distinct_caller(&caller, &target).is_ok());
    }
}
