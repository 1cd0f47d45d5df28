//! Ad group registry port.

use crate::domain::{AdGroup, AdGroupId};
use crate::error::Result;

/// Storage for the set of known ad groups.
pub trait AdGroupRepository: Send + Sync {
    /// Look up one ad group.
    fn find_ad_group(&self, id: &AdGroupId) -> Result<Option<AdGroup>>;

    /// All registered ad groups ordered by id.
    fn list_ad_groups(&self) -> Result<Vec<AdGroup>>;

    /// Insert or replace an ad group.
    fn upsert_ad_group(&self, group: &AdGroup) -> Result<()>;

    /// Whether the ad group is registered.
    fn ad_group_exists(&self, id: &AdGroupId) -> Result<bool> {
        Ok(self.find_ad_group(id)?.is_some())
    }
}
