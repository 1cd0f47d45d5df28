//! In-memory repositories.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use parking_lot::RwLock;

use crate::domain::snapshot::resolve_upsert;
use crate::domain::{
    AdGroup, AdGroupId, AdSpendRecord, DailyAdGroupForecastRow, DateRange, ForecastSnapshot,
    Order, OrderId, SnapshotOutcome,
};
use crate::error::Result;
use crate::port::outbound::{
    AdGroupRepository, AdSpendRepository, OrderRepository, SnapshotRepository,
};

type DayKey = (NaiveDate, AdGroupId);

/// Thread-safe store backing every repository port with `BTreeMap`s.
#[derive(Default)]
pub struct InMemoryStore {
    ad_groups: RwLock<BTreeMap<AdGroupId, AdGroup>>,
    orders: RwLock<BTreeMap<OrderId, Order>>,
    spend: RwLock<BTreeMap<DayKey, AdSpendRecord>>,
    snapshots: RwLock<BTreeMap<DayKey, ForecastSnapshot>>,
}

fn in_filter(filter: Option<&AdGroupId>, id: &AdGroupId) -> bool {
    filter.map_or(true, |f| f == id)
}

impl AdGroupRepository for InMemoryStore {
    fn find_ad_group(&self, id: &AdGroupId) -> Result<Option<AdGroup>> {
        Ok(self.ad_groups.read().get(id).cloned())
    }

    fn list_ad_groups(&self) -> Result<Vec<AdGroup>> {
        Ok(self.ad_groups.read().values().cloned().collect())
    }

    fn upsert_ad_group(&self, group: &AdGroup) -> Result<()> {
        self.ad_groups
            .write()
            .insert(group.id.clone(), group.clone());
        Ok(())
    }
}

impl OrderRepository for InMemoryStore {
    fn orders_in_range(
        &self,
        range: &DateRange,
        ad_group: Option<&AdGroupId>,
    ) -> Result<Vec<Order>> {
        Ok(self
            .orders
            .read()
            .values()
            .filter(|o| range.contains(o.order_date) && in_filter(ad_group, &o.ad_group_id))
            .cloned()
            .collect())
    }

    fn upsert_order(&self, order: &Order) -> Result<()> {
        self.orders.write().insert(order.id.clone(), order.clone());
        Ok(())
    }
}

impl AdSpendRepository for InMemoryStore {
    fn spend_in_range(
        &self,
        range: &DateRange,
        ad_group: Option<&AdGroupId>,
    ) -> Result<Vec<AdSpendRecord>> {
        Ok(self
            .spend
            .read()
            .values()
            .filter(|r| range.contains(r.date) && in_filter(ad_group, &r.ad_group_id))
            .cloned()
            .collect())
    }

    fn upsert_spend(&self, record: &AdSpendRecord) -> Result<()> {
        self.spend.write().insert(
            (record.date, record.ad_group_id.clone()),
            record.clone(),
        );
        Ok(())
    }
}

impl SnapshotRepository for InMemoryStore {
    fn upsert_snapshot(
        &self,
        row: &DailyAdGroupForecastRow,
        computed_at: DateTime<Utc>,
    ) -> Result<SnapshotOutcome> {
        let mut snapshots = self.snapshots.write();
        let key = (row.date, row.ad_group_id.clone());
        let outcome = resolve_upsert(snapshots.get(&key).map(|s| &s.row), row);
        if matches!(outcome, SnapshotOutcome::Inserted | SnapshotOutcome::Updated) {
            snapshots.insert(
                key,
                ForecastSnapshot {
                    row: row.clone(),
                    computed_at,
                },
            );
        }
        Ok(outcome)
    }

    fn snapshots_in_range(
        &self,
        range: &DateRange,
        ad_group: Option<&AdGroupId>,
    ) -> Result<Vec<ForecastSnapshot>> {
        Ok(self
            .snapshots
            .read()
            .values()
            .filter(|s| range.contains(s.row.date) && in_filter(ad_group, &s.row.ad_group_id))
            .cloned()
            .collect())
    }
}
