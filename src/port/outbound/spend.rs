//! Ad spend storage port.

use crate::domain::{AdGroupId, AdSpendRecord, DateRange};
use crate::error::Result;

pub trait AdSpendRepository: Send + Sync {
    /// Spend records dated within `range`, optionally for one ad group.
    fn spend_in_range(
        &self,
        range: &DateRange,
        ad_group: Option<&AdGroupId>,
    ) -> Result<Vec<AdSpendRecord>>;

    /// Insert or replace the record keyed by `(date, ad_group_id)`.
    fn upsert_spend(&self, record: &AdSpendRecord) -> Result<()>;
}
